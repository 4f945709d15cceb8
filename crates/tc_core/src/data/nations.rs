//! Nation catalogue
//!
//! Name → nation id table of the game database, in catalogue order. Fuzzy
//! lookups walk this order, so the first partial match is deterministic.

/// Nation names and ids, in catalogue order
pub const NATIONS: &[(&str, u32)] = &[
    ("Albania", 1),
    ("Andorra", 2),
    ("Armenia", 3),
    ("Austria", 4),
    ("Azerbaijan", 5),
    ("Belarus", 6),
    ("Belgium", 7),
    ("Bosnia and Herzegovina", 8),
    ("Bulgaria", 9),
    ("Croatia", 10),
    ("Cyprus", 11),
    ("Czech Republic", 12),
    ("Denmark", 13),
    ("England", 14),
    ("Montenegro", 15),
    ("Faroe Islands", 16),
    ("Finland", 17),
    ("France", 18),
    ("North Macedonia", 19),
    ("Georgia", 20),
    ("Germany", 21),
    ("Greece", 22),
    ("Hungary", 23),
    ("Iceland", 24),
    ("Republic of Ireland", 25),
    ("Israel", 26),
    ("Italy", 27),
    ("Latvia", 28),
    ("Liechtenstein", 29),
    ("Lithuania", 30),
    ("Luxembourg", 31),
    ("Malta", 32),
    ("Moldova", 33),
    ("Holland", 34),
    ("Northern Ireland", 35),
    ("Norway", 36),
    ("Poland", 37),
    ("Portugal", 38),
    ("Romania", 39),
    ("Russia", 40),
    ("San Marino", 41),
    ("Scotland", 42),
    ("Slovakia", 43),
    ("Slovenia", 44),
    ("Spain", 45),
    ("Sweden", 46),
    ("Switzerland", 47),
    ("Turkey", 48),
    ("Ukraine", 49),
    ("Wales", 50),
    ("Serbia", 51),
    ("Argentina", 52),
    ("Bolivia", 53),
    ("Brazil", 54),
    ("Chile", 55),
    ("Colombia", 56),
    ("Ecuador", 57),
    ("Paraguay", 58),
    ("Peru", 59),
    ("Uruguay", 60),
    ("Venezuela", 61),
    ("Anguilla", 62),
    ("Antigua and Barbuda", 63),
    ("Aruba", 64),
    ("Bahamas", 65),
    ("Barbados", 66),
    ("Belize", 67),
    ("Bermuda", 68),
    ("British Virgin Islands", 69),
    ("Canada", 70),
    ("Cayman Islands", 71),
    ("Costa Rica", 72),
    ("Cuba", 73),
    ("Dominica", 74),
    ("International", 75),
    ("El Salvador", 76),
    ("Grenada", 77),
    ("Guatemala", 78),
    ("Guyana", 79),
    ("Haiti", 80),
    ("Honduras", 81),
    ("Jamaica", 82),
    ("Mexico", 83),
    ("Montserrat", 84),
    ("Curaçao", 85),
    ("Nicaragua", 86),
    ("Panama", 87),
    ("Puerto Rico", 88),
    ("St. Kitts and Nevis", 89),
    ("St. Lucia", 90),
    ("St. Vincent and the Grenadines", 91),
    ("Suriname", 92),
    ("Trinidad and Tobago", 93),
    ("Turks and Caicos Islands", 94),
    ("United States", 95),
    ("US Virgin Islands", 96),
    ("Algeria", 97),
    ("Angola", 98),
    ("Benin", 99),
    ("Botswana", 100),
    ("Burkina Faso", 101),
    ("Burundi", 102),
    ("Cameroon", 103),
    ("Cape Verde Islands", 104),
    ("Central African Republic", 105),
    ("Chad", 106),
    ("Congo", 107),
    ("Côte d'Ivoire", 108),
    ("Djibouti", 109),
    ("Congo DR", 110),
    ("Egypt", 111),
    ("Equatorial Guinea", 112),
    ("Eritrea", 113),
    ("Ethiopia", 114),
    ("Gabon", 115),
    ("Gambia", 116),
    ("Ghana", 117),
    ("Guinea", 118),
    ("Guinea-Bissau", 119),
    ("Kenya", 120),
    ("Lesotho", 121),
    ("Liberia", 122),
    ("Libya", 123),
    ("Madagascar", 124),
    ("Malawi", 125),
    ("Mali", 126),
    ("Mauritania", 127),
    ("Mauritius", 128),
    ("Morocco", 129),
    ("Mozambique", 130),
    ("Namibia", 131),
    ("Niger", 132),
    ("Nigeria", 133),
    ("Rwanda", 134),
    ("São Tomé e Príncipe", 135),
    ("Senegal", 136),
    ("Seychelles", 137),
    ("Sierra Leone", 138),
    ("Somalia", 139),
    ("South Africa", 140),
    ("Sudan", 141),
    ("Eswatini", 142),
    ("Tanzania", 143),
    ("Togo", 144),
    ("Tunisia", 145),
    ("Uganda", 146),
    ("Zambia", 147),
    ("Zimbabwe", 148),
    ("Afghanistan", 149),
    ("Bahrain", 150),
    ("Bangladesh", 151),
    ("Bhutan", 152),
    ("Brunei Darussalam", 153),
    ("Cambodia", 154),
    ("China PR", 155),
    ("Guam", 157),
    ("Hong Kong", 158),
    ("India", 159),
    ("Indonesia", 160),
    ("Iran", 161),
    ("Iraq", 162),
    ("Japan", 163),
    ("Jordan", 164),
    ("Kazakhstan", 165),
    ("Korea DPR", 166),
    ("Korea Republic", 167),
    ("Kuwait", 168),
    ("Kyrgyzstan", 169),
    ("Laos", 170),
    ("Lebanon", 171),
    ("Macau", 172),
    ("Malaysia", 173),
    ("Maldives", 174),
    ("Mongolia", 175),
    ("Myanmar", 176),
    ("Nepal", 177),
    ("Oman", 178),
    ("Pakistan", 179),
    ("Palestine", 180),
    ("Philippines", 181),
    ("Qatar", 182),
    ("Saudi Arabia", 183),
    ("Singapore", 184),
    ("Sri Lanka", 185),
    ("Syria", 186),
    ("Tajikistan", 187),
    ("Thailand", 188),
    ("Turkmenistan", 189),
    ("United Arab Emirates", 190),
    ("Uzbekistan", 191),
    ("Vietnam", 192),
    ("Yemen", 193),
    ("American Samoa", 194),
    ("Australia", 195),
    ("Cook Islands", 196),
    ("Fiji", 197),
    ("New Zealand", 198),
    ("Papua New Guinea", 199),
    ("Samoa", 200),
    ("Solomon Islands", 201),
    ("Tahiti", 202),
    ("Tonga", 203),
    ("Vanuatu", 204),
    ("Gibraltar", 205),
    ("Greenland", 206),
    ("Dominican Republic", 207),
    ("Estonia", 208),
    ("Timor-Leste", 212),
    ("Chinese Taipei", 213),
    ("Comoros", 214),
    ("New Caledonia", 215),
    ("South Sudan", 218),
    ("Kosovo", 219),
];

/// Nations that already ship as national teams in the base game
pub const BASE_GAME_NATIONS: &[&str] = &[
    "Argentina",
    "Croatia",
    "Czech Republic",
    "Czechia",
    "Denmark",
    "England",
    "Finland",
    "France",
    "Germany",
    "Ghana",
    "Hungary",
    "Iceland",
    "Republic of Ireland",
    "Ireland",
    "Israel",
    "Italy",
    "Mexico",
    "Morocco",
    "Holland",
    "Netherlands",
    "Northern Ireland",
    "Norway",
    "Poland",
    "Portugal",
    "Qatar",
    "Romania",
    "Scotland",
    "Spain",
    "Sweden",
    "Ukraine",
    "United States",
    "Wales",
];

/// Nation id for an exact catalogue name
pub fn nation_id(name: &str) -> Option<u32> {
    NATIONS.iter().find(|(n, _)| *n == name).map(|(_, id)| *id)
}

/// Catalogue name for a nation id
pub fn nation_name(id: u32) -> Option<&'static str> {
    NATIONS.iter().find(|(_, n)| *n == id).map(|(name, _)| *name)
}

/// Resolve a user-typed nation name.
///
/// Exact (case-insensitive) match first, then the first catalogue entry whose
/// name contains the query.
pub fn resolve_nation(query: &str) -> Option<(&'static str, u32)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    NATIONS
        .iter()
        .find(|(n, _)| n.to_lowercase() == query)
        .or_else(|| NATIONS.iter().find(|(n, _)| n.to_lowercase().contains(&query)))
        .copied()
}

/// Whether the base game (or `extra`) already has this nation's team
pub fn is_base_game_nation(name: &str, extra: &[String]) -> bool {
    BASE_GAME_NATIONS.contains(&name) || extra.iter().any(|n| n == name)
}
