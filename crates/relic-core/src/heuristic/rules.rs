//! Keyword tables for the offline analyzer.
//!
//! Keywords are matched against lowercased, punctuation-free text, so
//! multi-word entries use single spaces (`"bronze age"`, `"anglo saxon"`).
//! Table order is significant: it breaks ties and fixes output order.

use serde::Serialize;

/// Broad artifact classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pottery,
    Sculpture,
    Coin,
    Weapon,
    Tool,
    Jewelry,
    Manuscript,
    Textile,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pottery => "Pottery & ceramics",
            Self::Sculpture => "Sculpture & statuary",
            Self::Coin => "Coinage & numismatics",
            Self::Weapon => "Weapons & armour",
            Self::Tool => "Tools & implements",
            Self::Jewelry => "Jewelry & personal ornament",
            Self::Manuscript => "Manuscripts & documents",
            Self::Textile => "Textiles & costume",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::Pottery => "ceramic vessels",
            Self::Sculpture => "sculptures",
            Self::Coin => "coins",
            Self::Weapon => "weapons",
            Self::Tool => "tools",
            Self::Jewelry => "ornaments",
            Self::Manuscript => "manuscripts",
            Self::Textile => "textiles",
        }
    }

    pub fn significance(&self) -> &'static str {
        match self {
            Self::Pottery => "Ceramics are among the most reliable dating tools in archaeology and record diet, trade routes and workshop technology.",
            Self::Sculpture => "Sculpture documents religious practice, political display and artistic conventions of the society that produced it.",
            Self::Coin => "Coins anchor chronologies and reveal economic networks, rulers and political messaging.",
            Self::Weapon => "Weapons reflect metallurgical skill, warfare, status display and burial customs.",
            Self::Tool => "Tools show how people worked, farmed and crafted, and often define archaeological cultures.",
            Self::Jewelry => "Personal ornaments signal identity, wealth, belief and long-distance exchange of raw materials.",
            Self::Manuscript => "Written documents preserve language, administration, belief and the voices of their authors directly.",
            Self::Textile => "Textiles survive rarely and give direct evidence of dress, trade in fibres and dyes, and household labour.",
        }
    }

    pub fn reference_examples(&self) -> &'static str {
        match self {
            Self::Pottery => "Attic black-figure amphorae, Roman terra sigillata, Ming blue-and-white porcelain",
            Self::Sculpture => "Cycladic figurines, Roman portrait busts, Gandharan Buddha images",
            Self::Coin => "Athenian silver tetradrachms, Roman denarii, Byzantine gold solidi",
            Self::Weapon => "Bronze Age leaf-shaped swords, Viking pattern-welded blades, Japanese tachi",
            Self::Tool => "Acheulean hand axes, Roman iron agricultural tools, Neolithic polished stone axes",
            Self::Jewelry => "Egyptian faience collars, Anglo-Saxon garnet cloisonne brooches, Roman gold finger rings",
            Self::Manuscript => "Dead Sea Scrolls, Carolingian gospel books, Ottoman firmans",
            Self::Textile => "Coptic tapestry fragments, Paracas mantles, medieval silk vestments",
        }
    }
}

pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Pottery,
        keywords: &[
            "pottery", "pot", "vessel", "vase", "jar", "amphora", "bowl", "jug", "urn", "sherd",
            "shard", "potsherd", "ceramic", "krater", "kylix", "pitcher", "flask", "lamp", "plate",
            "dish", "cup", "goblet", "terracotta", "earthenware", "porcelain", "stoneware",
        ],
    },
    CategoryRule {
        category: Category::Sculpture,
        keywords: &[
            "statue", "statuette", "sculpture", "figurine", "bust", "relief", "carving", "idol",
            "head", "torso", "stele", "stela", "effigy", "mask", "frieze",
        ],
    },
    CategoryRule {
        category: Category::Coin,
        keywords: &[
            "coin", "denarius", "denarii", "drachm", "tetradrachm", "solidus", "obverse",
            "reverse", "mint", "minted", "numismatic", "stater", "aureus", "token",
        ],
    },
    CategoryRule {
        category: Category::Weapon,
        keywords: &[
            "sword", "blade", "dagger", "spear", "spearhead", "arrowhead", "axe", "helmet",
            "shield", "armour", "armor", "hilt", "scabbard", "mace", "lance", "halberd",
        ],
    },
    CategoryRule {
        category: Category::Tool,
        keywords: &[
            "tool", "chisel", "scraper", "awl", "needle", "sickle", "hammer", "adze", "hoe",
            "plough", "plow", "grinder", "quern", "spindle", "whorl", "knife", "handaxe",
            "implement", "flake",
        ],
    },
    CategoryRule {
        category: Category::Jewelry,
        keywords: &[
            "ring", "necklace", "pendant", "brooch", "fibula", "bracelet", "earring", "bead",
            "amulet", "torc", "torque", "diadem", "pin", "jewelry", "jewellery", "ornament",
            "cameo", "signet",
        ],
    },
    CategoryRule {
        category: Category::Manuscript,
        keywords: &[
            "manuscript", "scroll", "codex", "papyrus", "parchment", "vellum", "letter",
            "document", "book", "folio", "page", "charter", "deed", "tablet", "map",
        ],
    },
    CategoryRule {
        category: Category::Textile,
        keywords: &[
            "textile", "cloth", "fabric", "tapestry", "garment", "robe", "tunic", "rug", "carpet",
            "embroidery", "embroidered", "weaving", "woven", "shroud",
        ],
    },
];

/// Material groups that drive technique and lab recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialFamily {
    Metal,
    Ceramic,
    Stone,
    Organic,
    Glass,
    WritingSupport,
    Fibre,
}

impl MaterialFamily {
    pub fn technique(&self) -> &'static str {
        match self {
            Self::Metal => "Metalwork is usually cast, hammered or wrought; look for mould seams, tool marks, solder joins and casting porosity.",
            Self::Ceramic => "Ceramics are formed by hand, coil or wheel and then fired; rim profile, temper, slip and glaze reveal workshop practice.",
            Self::Stone => "Stone is carved, ground, drilled or knapped; tool marks and surface polish record the working sequence.",
            Self::Organic => "Organic materials are carved or shaped along their grain or growth structure, which limits the possible techniques.",
            Self::Glass => "Glass is core-formed, cast, moulded or blown; bubble shape and seam lines indicate the method.",
            Self::WritingSupport => "Writing supports are specially prepared; ruling, ink type, hand and binding structure reflect scribal practice.",
            Self::Fibre => "Fibres are spun and woven or felted; weave structure, thread count and dyes reflect production methods.",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Self::Metal => &[
                "X-ray fluorescence (XRF) to determine alloy composition",
                "Metallographic and corrosion-layer examination to separate ancient from modern work",
            ],
            Self::Ceramic => &[
                "Thermoluminescence (TL) dating of the fired body",
                "Petrographic thin-section analysis to source the clay",
            ],
            Self::Stone => &[
                "Petrographic or isotopic analysis to source the stone",
                "Microscopic use-wear and residue analysis of worked surfaces",
            ],
            Self::Organic => &[
                "Radiocarbon (AMS) dating of a small sample",
                "Species identification (wood anatomy or collagen fingerprinting)",
            ],
            Self::Glass => &["Chemical analysis (LA-ICP-MS) of the glass composition"],
            Self::WritingSupport => &[
                "Multispectral imaging to recover faded or erased text",
                "Radiocarbon dating of the writing support",
            ],
            Self::Fibre => &[
                "Fibre identification under microscopy",
                "Dye analysis (HPLC) to identify natural or synthetic colourants",
            ],
        }
    }
}

pub struct MaterialRule {
    pub name: &'static str,
    pub family: MaterialFamily,
    pub keywords: &'static [&'static str],
}

pub const MATERIAL_RULES: &[MaterialRule] = &[
    MaterialRule { name: "Gold", family: MaterialFamily::Metal, keywords: &["gold", "golden", "gilded", "gilt"] },
    MaterialRule { name: "Silver", family: MaterialFamily::Metal, keywords: &["silver", "electrum"] },
    MaterialRule { name: "Bronze", family: MaterialFamily::Metal, keywords: &["bronze"] },
    MaterialRule { name: "Copper alloy", family: MaterialFamily::Metal, keywords: &["copper", "brass"] },
    MaterialRule { name: "Iron", family: MaterialFamily::Metal, keywords: &["iron", "steel", "wrought"] },
    MaterialRule { name: "Fired clay", family: MaterialFamily::Ceramic, keywords: &["clay", "terracotta", "earthenware", "ceramic"] },
    MaterialRule { name: "Porcelain / stoneware", family: MaterialFamily::Ceramic, keywords: &["porcelain", "stoneware", "celadon"] },
    MaterialRule { name: "Faience", family: MaterialFamily::Ceramic, keywords: &["faience"] },
    MaterialRule { name: "Marble", family: MaterialFamily::Stone, keywords: &["marble", "alabaster"] },
    MaterialRule { name: "Limestone / sandstone", family: MaterialFamily::Stone, keywords: &["limestone", "sandstone", "granite", "basalt", "stone"] },
    MaterialRule { name: "Flint / obsidian", family: MaterialFamily::Stone, keywords: &["flint", "chert", "obsidian"] },
    MaterialRule { name: "Jade", family: MaterialFamily::Stone, keywords: &["jade", "nephrite", "jadeite"] },
    MaterialRule { name: "Wood", family: MaterialFamily::Organic, keywords: &["wood", "wooden", "oak", "cedar", "timber"] },
    MaterialRule { name: "Bone / ivory", family: MaterialFamily::Organic, keywords: &["bone", "ivory", "antler", "horn"] },
    MaterialRule { name: "Shell / amber", family: MaterialFamily::Organic, keywords: &["shell", "amber", "pearl", "coral"] },
    MaterialRule { name: "Leather", family: MaterialFamily::Organic, keywords: &["leather", "hide"] },
    MaterialRule { name: "Glass", family: MaterialFamily::Glass, keywords: &["glass", "glazed bead"] },
    MaterialRule { name: "Parchment / papyrus / paper", family: MaterialFamily::WritingSupport, keywords: &["parchment", "vellum", "papyrus", "paper"] },
    MaterialRule { name: "Textile fibre", family: MaterialFamily::Fibre, keywords: &["linen", "wool", "woolen", "silk", "cotton"] },
];

pub struct CultureRule {
    pub name: &'static str,
    pub range: &'static str,
    pub keywords: &'static [&'static str],
}

pub const CULTURE_RULES: &[CultureRule] = &[
    CultureRule { name: "Palaeolithic", range: "c. 2.5 million - 10,000 BCE", keywords: &["paleolithic", "palaeolithic", "stone age"] },
    CultureRule { name: "Neolithic", range: "c. 10,000 - 2000 BCE", keywords: &["neolithic"] },
    CultureRule { name: "Indus Valley", range: "c. 3300 - 1300 BCE", keywords: &["indus", "harappan"] },
    CultureRule { name: "Mesopotamian", range: "c. 3500 - 539 BCE", keywords: &["mesopotamian", "mesopotamia", "sumerian", "babylonian", "assyrian", "akkadian"] },
    CultureRule { name: "Ancient Egyptian", range: "c. 3100 - 30 BCE", keywords: &["egyptian", "egypt", "pharaoh", "pharaonic", "nile"] },
    CultureRule { name: "Bronze Age", range: "c. 3300 - 1200 BCE", keywords: &["bronze age", "minoan", "mycenaean"] },
    CultureRule { name: "Iron Age", range: "c. 1200 BCE - 500 CE (varies by region)", keywords: &["iron age", "hallstatt"] },
    CultureRule { name: "Ancient Greek", range: "c. 800 - 31 BCE", keywords: &["greek", "greece", "hellenistic", "attic", "corinthian", "athenian"] },
    CultureRule { name: "Etruscan", range: "c. 900 - 27 BCE", keywords: &["etruscan"] },
    CultureRule { name: "Celtic", range: "c. 800 BCE - 100 CE", keywords: &["celtic", "celts", "la tene", "gaulish"] },
    CultureRule { name: "Roman", range: "c. 509 BCE - 476 CE", keywords: &["roman", "rome", "romano"] },
    CultureRule { name: "Han dynasty", range: "206 BCE - 220 CE", keywords: &["han dynasty"] },
    CultureRule { name: "Maya", range: "c. 2000 BCE - 1500 CE", keywords: &["maya", "mayan"] },
    CultureRule { name: "Byzantine", range: "c. 330 - 1453 CE", keywords: &["byzantine", "byzantium", "constantinople"] },
    CultureRule { name: "Anglo-Saxon", range: "c. 410 - 1066 CE", keywords: &["anglo saxon", "saxon"] },
    CultureRule { name: "Tang dynasty", range: "618 - 907 CE", keywords: &["tang dynasty", "tang"] },
    CultureRule { name: "Islamic", range: "7th century CE onward", keywords: &["islamic", "abbasid", "umayyad", "fatimid", "seljuk"] },
    CultureRule { name: "Viking / Norse", range: "c. 793 - 1066 CE", keywords: &["viking", "norse", "runestone"] },
    CultureRule { name: "Medieval European", range: "c. 500 - 1500 CE", keywords: &["medieval", "mediaeval", "gothic", "romanesque", "carolingian"] },
    CultureRule { name: "Aztec", range: "c. 1300 - 1521 CE", keywords: &["aztec", "mexica"] },
    CultureRule { name: "Inca", range: "c. 1400 - 1533 CE", keywords: &["inca", "incan"] },
    CultureRule { name: "Ming dynasty", range: "1368 - 1644 CE", keywords: &["ming"] },
    CultureRule { name: "Renaissance", range: "c. 1400 - 1600 CE", keywords: &["renaissance"] },
    CultureRule { name: "Ottoman", range: "1299 - 1922 CE", keywords: &["ottoman"] },
    CultureRule { name: "Mughal", range: "1526 - 1857 CE", keywords: &["mughal"] },
    CultureRule { name: "Edo period", range: "1603 - 1868 CE", keywords: &["edo"] },
    CultureRule { name: "Qing dynasty", range: "1644 - 1912 CE", keywords: &["qing"] },
    CultureRule { name: "Victorian", range: "1837 - 1901 CE", keywords: &["victorian"] },
];

/// Condition words and whether they indicate damage.
pub const CONDITION_TERMS: &[(&str, bool)] = &[
    ("intact", false),
    ("complete", false),
    ("pristine", false),
    ("well preserved", false),
    ("excellent condition", false),
    ("good condition", false),
    ("broken", true),
    ("cracked", true),
    ("crack", true),
    ("chipped", true),
    ("chip", true),
    ("fragment", true),
    ("fragmentary", true),
    ("fragmented", true),
    ("corroded", true),
    ("corrosion", true),
    ("rust", true),
    ("rusted", true),
    ("tarnished", true),
    ("patina", true),
    ("faded", true),
    ("worn", true),
    ("eroded", true),
    ("weathered", true),
    ("damaged", true),
    ("missing", true),
    ("repaired", true),
    ("restored", true),
];

pub const MARKING_TERMS: &[&str] = &[
    "inscription", "inscribed", "engraved", "engraving", "stamped", "stamp", "hallmark",
    "signature", "signed", "monogram", "glyph", "hieroglyph", "hieroglyphic", "cuneiform",
    "rune", "runic", "script", "legend", "lettering", "marking", "maker mark", "seal",
    "calligraphy",
];
