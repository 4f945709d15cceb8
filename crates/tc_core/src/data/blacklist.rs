//! Players kept out of generated national squads

/// Built-in blacklist, sorted ascending for binary search
pub const BLACKLISTED_PLAYERS: &[u32] = &[
    27, 51, 240, 246, 250, 330, 524, 570, 1025, 1041, 1088, 1114, 1116, 1179, 1183, 1201, 1256,
    1397, 1551, 1605, 1615, 1620, 1625, 1668, 1845, 3622, 3647, 4231, 4833, 5003, 5419, 5454, 5467,
    5471, 5479, 5589, 5661, 5673, 5679, 5740, 5984, 6235, 6975, 7289, 7512, 7743, 7763, 8385, 8473,
    9676, 10264, 10535, 13128, 13743, 15723, 16254, 16619, 20289, 23174, 25924, 26709, 28130, 28765,
    30110, 31432, 34079, 37576, 39386, 40898, 44897, 45197, 45661, 45674, 48940, 49369, 50752,
    51257, 51412, 51539, 54050, 71557, 71587, 71608, 120274, 121939, 121944, 135455, 138449, 140601,
    142754, 150418, 155897, 156353, 156616, 161840, 164994, 166124, 166149, 166676, 166691, 166906,
    167134, 167135, 167198, 167425, 167680, 168880, 168886, 170890, 171877, 173210, 176580, 176676,
    183277, 184943, 190042, 190044, 190045, 190046, 190048, 191694, 191695, 191972, 192181, 214098,
    214100, 214101, 214267, 214649, 222000, 226293, 226306, 226369, 226373, 226764, 227002, 227006,
    227261, 227263, 227271, 227315, 227324, 230025, 233700, 237067, 238380, 238382, 238384, 238388,
    238424, 238427, 238428, 238430, 238435, 238439, 238443, 239261, 242510, 242519, 242625, 243027,
    243029, 243030, 247515, 247553, 247699, 247703, 248146, 250890, 251483, 254642, 261593, 262112,
    262271, 262285, 266473, 266690, 266691, 266694, 266695, 266801, 268513, 269603, 273812, 274750,
    274966, 274967, 275049, 275092, 275243, 275276,
];

/// Blacklist lookup combining the built-in ids with configured extras
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    extra: Vec<u32>,
}

impl Blacklist {
    pub fn new(extra: &[u32]) -> Self {
        let mut extra = extra.to_vec();
        extra.sort_unstable();
        extra.dedup();
        Self { extra }
    }

    pub fn contains(&self, player_id: u32) -> bool {
        BLACKLISTED_PLAYERS.binary_search(&player_id).is_ok()
            || self.extra.binary_search(&player_id).is_ok()
    }

    pub fn len(&self) -> usize {
        BLACKLISTED_PLAYERS.len() + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
