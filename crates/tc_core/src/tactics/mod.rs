pub mod formations;

pub use formations::{
    find_formation, random_formation, stock_formations, Formation, FormationSlot, SLOT_COUNT,
};
