//! Icon/category tag tables for food search.
//!
//! Each food name resolves to one icon (e.g. "Red Apple" -> `apple`). Each
//! locale contributes synonyms per icon and "combination" tags that expand
//! a category word to several icons ("fruit" -> apple, banana, ...). Tables
//! are built once per locale; English is always merged in as a base since
//! library names are frequently English regardless of the UI language.

use std::collections::{HashMap, HashSet};

use tracing::debug;

pub const BASE_LOCALE: &str = "en";

type IconTable = &'static [(&'static str, &'static [&'static str])];
type ComboTable = &'static [(&'static [&'static str], &'static [&'static str])];

struct LocaleTags {
    locale: &'static str,
    icons: IconTable,
    combinations: ComboTable,
}

const FRUIT: &[&str] = &[
    "apple", "pineapple", "banana", "orange", "grapes", "strawberry", "pear", "peach",
    "cherries", "lemon", "watermelon", "mango", "kiwi", "grapefruit",
];
const VEGETABLES: &[&str] = &[
    "carrot", "broccoli", "tomato", "potato", "cucumber", "salad", "corn", "pepper", "onion",
    "mushroom", "avocado",
];
const DAIRY: &[&str] = &["cheese", "milk", "yogurt", "butter"];
const MEAT: &[&str] = &["chicken", "beef", "pork"];
const SEAFOOD: &[&str] = &["fish", "shrimp"];
const GRAINS: &[&str] = &["bread", "rice", "pasta", "oats"];
const SWEETS: &[&str] = &["chocolate", "cookie", "cake", "ice_cream"];
const DRINKS: &[&str] = &["coffee", "tea", "juice", "beer", "wine", "water", "milk"];
const FAST_FOOD: &[&str] = &["pizza", "burger", "fries"];

static EN: LocaleTags = LocaleTags {
    locale: "en",
    icons: &[
        ("apple", &["apple", "apples"]),
        ("pineapple", &["pineapple", "ananas"]),
        ("banana", &["banana", "bananas"]),
        ("orange", &["orange", "oranges", "clementine", "mandarin", "tangerine"]),
        ("grapes", &["grape", "grapes", "raisin", "raisins"]),
        ("strawberry", &["strawberry", "strawberries", "berry", "berries"]),
        ("pear", &["pear", "pears"]),
        ("peach", &["peach", "peaches", "nectarine", "apricot"]),
        ("cherries", &["cherry", "cherries"]),
        ("lemon", &["lemon", "lime"]),
        ("watermelon", &["watermelon", "melon"]),
        ("mango", &["mango", "papaya"]),
        ("kiwi", &["kiwi"]),
        ("grapefruit", &["grapefruit"]),
        ("carrot", &["carrot", "carrots"]),
        ("broccoli", &["broccoli", "cauliflower"]),
        ("tomato", &["tomato", "tomatoes"]),
        ("potato", &["potato", "potatoes"]),
        ("cucumber", &["cucumber", "zucchini", "courgette"]),
        ("salad", &["salad", "lettuce", "spinach", "kale"]),
        ("corn", &["corn", "maize"]),
        ("pepper", &["pepper", "paprika", "chili"]),
        ("onion", &["onion", "garlic", "leek"]),
        ("mushroom", &["mushroom", "mushrooms"]),
        ("avocado", &["avocado", "guacamole"]),
        ("bread", &["bread", "toast", "bagel", "baguette", "roll"]),
        ("rice", &["rice", "risotto", "sushi"]),
        ("pasta", &["pasta", "spaghetti", "noodles", "penne", "lasagna"]),
        ("oats", &["oats", "oatmeal", "porridge", "muesli", "granola", "cereal"]),
        ("chicken", &["chicken", "turkey", "poultry"]),
        ("beef", &["beef", "steak", "veal"]),
        ("pork", &["pork", "ham", "bacon", "sausage"]),
        ("fish", &["fish", "salmon", "tuna", "cod"]),
        ("shrimp", &["shrimp", "prawn", "prawns"]),
        ("egg", &["egg", "eggs", "omelette"]),
        ("cheese", &["cheese", "mozzarella", "cheddar", "parmesan"]),
        ("milk", &["milk"]),
        ("yogurt", &["yogurt", "yoghurt", "quark", "skyr"]),
        ("butter", &["butter", "margarine"]),
        ("nuts", &["nut", "nuts", "almond", "almonds", "peanut", "walnut", "cashew"]),
        ("chocolate", &["chocolate", "cocoa"]),
        ("cookie", &["cookie", "cookies", "biscuit"]),
        ("cake", &["cake", "muffin", "pie"]),
        ("ice_cream", &["ice cream", "gelato", "sorbet"]),
        ("pizza", &["pizza"]),
        ("burger", &["burger", "hamburger", "cheeseburger"]),
        ("fries", &["fries", "chips"]),
        ("coffee", &["coffee", "espresso", "latte", "cappuccino"]),
        ("tea", &["tea"]),
        ("juice", &["juice", "smoothie"]),
        ("beer", &["beer"]),
        ("wine", &["wine"]),
        ("water", &["water"]),
    ],
    combinations: &[
        (&["fruit", "fruits"], FRUIT),
        (&["vegetable", "vegetables", "veggies"], VEGETABLES),
        (&["dairy"], DAIRY),
        (&["meat"], MEAT),
        (&["seafood"], SEAFOOD),
        (&["grain", "grains", "carbs"], GRAINS),
        (&["sweets", "dessert", "snack"], SWEETS),
        (&["drink", "drinks", "beverage"], DRINKS),
        (&["fast food", "junk food"], FAST_FOOD),
    ],
};

static DE: LocaleTags = LocaleTags {
    locale: "de",
    icons: &[
        ("apple", &["apfel", "äpfel"]),
        ("pineapple", &["ananas"]),
        ("banana", &["banane", "bananen"]),
        ("orange", &["orange", "apfelsine", "mandarine"]),
        ("grapes", &["traube", "trauben", "weintraube", "rosine"]),
        ("strawberry", &["erdbeere", "erdbeeren", "beere", "beeren"]),
        ("pear", &["birne", "birnen"]),
        ("peach", &["pfirsich", "nektarine", "aprikose"]),
        ("cherries", &["kirsche", "kirschen"]),
        ("lemon", &["zitrone", "limette"]),
        ("watermelon", &["wassermelone", "melone"]),
        ("carrot", &["karotte", "möhre", "rüebli"]),
        ("tomato", &["tomate", "tomaten"]),
        ("potato", &["kartoffel", "kartoffeln"]),
        ("cucumber", &["gurke", "zucchini"]),
        ("salad", &["salat", "spinat", "grünkohl"]),
        ("corn", &["mais"]),
        ("onion", &["zwiebel", "knoblauch", "lauch"]),
        ("mushroom", &["pilz", "pilze", "champignon"]),
        ("bread", &["brot", "brötchen", "semmel", "toast"]),
        ("rice", &["reis"]),
        ("pasta", &["nudeln", "spätzle"]),
        ("oats", &["hafer", "haferflocken", "müsli"]),
        ("chicken", &["hähnchen", "huhn", "pute", "geflügel"]),
        ("beef", &["rind", "rindfleisch", "kalb"]),
        ("pork", &["schwein", "schinken", "speck", "wurst"]),
        ("fish", &["fisch", "lachs", "thunfisch", "kabeljau"]),
        ("shrimp", &["garnele", "garnelen", "krabben"]),
        ("egg", &["ei", "eier", "spiegelei", "rührei"]),
        ("cheese", &["käse"]),
        ("milk", &["milch"]),
        ("yogurt", &["joghurt", "quark"]),
        ("nuts", &["nuss", "nüsse", "mandel", "mandeln", "erdnuss"]),
        ("chocolate", &["schokolade", "kakao"]),
        ("cookie", &["keks", "kekse"]),
        ("cake", &["kuchen", "torte"]),
        ("ice_cream", &["eis", "speiseeis"]),
        ("fries", &["pommes"]),
        ("coffee", &["kaffee"]),
        ("tea", &["tee"]),
        ("juice", &["saft"]),
        ("beer", &["bier"]),
        ("wine", &["wein"]),
        ("water", &["wasser"]),
    ],
    combinations: &[
        (&["obst", "frucht", "früchte"], FRUIT),
        (&["gemüse"], VEGETABLES),
        (&["milchprodukte"], DAIRY),
        (&["fleisch"], MEAT),
        (&["meeresfrüchte"], SEAFOOD),
        (&["getreide", "kohlenhydrate"], GRAINS),
        (&["süßigkeiten", "nachtisch", "dessert"], SWEETS),
        (&["getränk", "getränke"], DRINKS),
    ],
};

static ES: LocaleTags = LocaleTags {
    locale: "es",
    icons: &[
        ("apple", &["manzana", "manzanas"]),
        ("pineapple", &["piña"]),
        ("banana", &["plátano", "platano", "banana"]),
        ("orange", &["naranja", "mandarina"]),
        ("grapes", &["uva", "uvas", "pasas"]),
        ("strawberry", &["fresa", "fresas"]),
        ("pear", &["pera", "peras"]),
        ("peach", &["melocotón", "durazno", "albaricoque"]),
        ("cherries", &["cereza", "cerezas"]),
        ("lemon", &["limón", "lima"]),
        ("watermelon", &["sandía", "melón"]),
        ("carrot", &["zanahoria"]),
        ("tomato", &["tomate"]),
        ("potato", &["patata", "papa"]),
        ("cucumber", &["pepino", "calabacín"]),
        ("salad", &["ensalada", "lechuga", "espinaca"]),
        ("corn", &["maíz"]),
        ("onion", &["cebolla", "ajo"]),
        ("mushroom", &["champiñón", "seta"]),
        ("bread", &["pan", "tostada"]),
        ("rice", &["arroz", "paella"]),
        ("pasta", &["pasta", "fideos", "macarrones"]),
        ("oats", &["avena", "cereales"]),
        ("chicken", &["pollo", "pavo"]),
        ("beef", &["ternera", "carne de res", "bistec"]),
        ("pork", &["cerdo", "jamón", "chorizo"]),
        ("fish", &["pescado", "salmón", "atún", "bacalao"]),
        ("shrimp", &["gamba", "gambas", "camarón"]),
        ("egg", &["huevo", "huevos", "tortilla"]),
        ("cheese", &["queso"]),
        ("milk", &["leche"]),
        ("yogurt", &["yogur"]),
        ("nuts", &["nuez", "nueces", "almendra", "cacahuete"]),
        ("chocolate", &["chocolate", "cacao"]),
        ("cookie", &["galleta", "galletas"]),
        ("cake", &["pastel", "tarta", "bizcocho"]),
        ("ice_cream", &["helado"]),
        ("coffee", &["café"]),
        ("tea", &["té"]),
        ("juice", &["zumo", "jugo"]),
        ("beer", &["cerveza"]),
        ("wine", &["vino"]),
        ("water", &["agua"]),
    ],
    combinations: &[
        (&["fruta", "frutas"], FRUIT),
        (&["verdura", "verduras", "vegetales"], VEGETABLES),
        (&["lácteos"], DAIRY),
        (&["carne"], MEAT),
        (&["marisco", "mariscos"], SEAFOOD),
        (&["cereal", "carbohidratos"], GRAINS),
        (&["dulces", "postre"], SWEETS),
        (&["bebida", "bebidas"], DRINKS),
        (&["comida rápida"], FAST_FOOD),
    ],
};

static LOCALES: &[&LocaleTags] = &[&EN, &DE, &ES];

/// Keywords shorter than this only match a whole word of a food name.
const WHOLE_WORD_BELOW: usize = 4;

/// Tag tables for one locale (merged with the English base).
#[derive(Debug)]
pub struct TagIndex {
    locale: String,
    icon_tags: HashMap<&'static str, HashSet<String>>,
    /// `(keyword, icon)`, longest keyword first, for name resolution.
    keywords: Vec<(String, &'static str)>,
    combinations: Vec<(String, &'static [&'static str])>,
}

impl TagIndex {
    pub fn for_locale(locale: &str) -> Self {
        let locale = locale.trim().to_lowercase();
        let mut tables: Vec<&LocaleTags> = vec![&EN];
        if let Some(extra) = LOCALES
            .iter()
            .find(|t| t.locale == locale && t.locale != BASE_LOCALE)
        {
            // locale-specific synonyms win ties in keyword order
            tables.insert(0, *extra);
        }

        let mut icon_tags: HashMap<&'static str, HashSet<String>> = HashMap::new();
        let mut keywords = Vec::new();
        let mut combinations = Vec::new();
        for table in tables {
            for (icon, tags) in table.icons {
                let set = icon_tags.entry(*icon).or_default();
                for tag in *tags {
                    let tag = tag.to_lowercase();
                    if set.insert(tag.clone()) {
                        keywords.push((tag, *icon));
                    }
                }
            }
            for (names, members) in table.combinations {
                for name in *names {
                    combinations.push((name.to_lowercase(), *members));
                }
            }
        }
        // stable: equal lengths keep table order
        keywords.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        debug!(
            locale = %locale,
            icons = icon_tags.len(),
            keywords = keywords.len(),
            combinations = combinations.len(),
            "tag index built"
        );
        Self {
            locale,
            icon_tags,
            keywords,
            combinations,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Icon for a food name, if any keyword of this locale occurs in it.
    pub fn resolve_icon_tag(&self, food_name: &str) -> Option<&'static str> {
        let name = food_name.to_lowercase();
        let words: Vec<&str> = name
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        self.keywords
            .iter()
            .find(|(kw, _)| {
                if kw.chars().count() < WHOLE_WORD_BELOW {
                    words.iter().any(|w| w == kw)
                } else {
                    name.contains(kw.as_str())
                }
            })
            .map(|(_, icon)| *icon)
    }

    /// Icons a lowercase query refers to, either through an icon's own tags
    /// or through a combination tag.
    pub fn resolve_query(&self, query: &str) -> HashSet<&'static str> {
        let mut icons: HashSet<&'static str> = self
            .icon_tags
            .iter()
            .filter(|(_, tags)| tags.iter().any(|t| t.contains(query)))
            .map(|(icon, _)| *icon)
            .collect();
        for (name, members) in &self.combinations {
            if name.contains(query) {
                icons.extend(members.iter().copied());
            }
        }
        icons
    }
}

/// All locale indexes, built once at startup.
#[derive(Debug)]
pub struct TagRegistry {
    indexes: Vec<TagIndex>,
    default_pos: usize,
}

impl TagRegistry {
    pub fn build(default_locale: &str) -> Self {
        let indexes: Vec<TagIndex> = LOCALES
            .iter()
            .map(|t| TagIndex::for_locale(t.locale))
            .collect();
        let wanted = default_locale.trim().to_lowercase();
        let default_pos = indexes
            .iter()
            .position(|i| i.locale == wanted)
            .or_else(|| indexes.iter().position(|i| i.locale == BASE_LOCALE))
            .unwrap_or(0);
        Self {
            indexes,
            default_pos,
        }
    }

    pub fn supported_locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.indexes.iter().map(TagIndex::locale).collect();
        locales.sort_unstable();
        locales
    }

    /// Index for `locale` (or the language part of a `de-AT` style tag),
    /// falling back to the default locale.
    pub fn index(&self, locale: Option<&str>) -> &TagIndex {
        let language = locale
            .map(|l| l.trim().to_lowercase())
            .and_then(|l| l.split(['-', '_']).next().map(str::to_string));
        let pos = language
            .and_then(|l| self.indexes.iter().position(|i| i.locale == l))
            .unwrap_or(self.default_pos);
        &self.indexes[pos]
    }

    pub fn resolve_icon_tag(&self, food_name: &str, locale: &str) -> Option<&'static str> {
        self.index(Some(locale)).resolve_icon_tag(food_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_icons_from_names() {
        let en = TagIndex::for_locale("en");
        assert_eq!(en.resolve_icon_tag("Red Apple"), Some("apple"));
        assert_eq!(en.resolve_icon_tag("Banana"), Some("banana"));
        assert_eq!(en.resolve_icon_tag("Side Salad"), Some("salad"));
        assert_eq!(en.resolve_icon_tag("Quinoa"), None);
    }

    #[test]
    fn longest_keyword_wins() {
        let en = TagIndex::for_locale("en");
        assert_eq!(en.resolve_icon_tag("Pineapple rings"), Some("pineapple"));
        assert_eq!(en.resolve_icon_tag("Grapefruit"), Some("grapefruit"));
    }

    #[test]
    fn short_keywords_need_whole_words() {
        let de = TagIndex::for_locale("de");
        assert_eq!(de.resolve_icon_tag("Ei gekocht"), Some("egg"));
        assert_eq!(de.resolve_icon_tag("Basmati Reis"), Some("rice"));
        assert_eq!(de.resolve_icon_tag("Vollkornbrot"), Some("bread"));
    }

    #[test]
    fn locale_index_includes_english_base() {
        let de = TagIndex::for_locale("de");
        assert_eq!(de.resolve_icon_tag("Apfel"), Some("apple"));
        assert_eq!(de.resolve_icon_tag("Apple pie"), Some("apple"));
    }

    #[test]
    fn combination_tags_expand_to_members() {
        let en = TagIndex::for_locale("en");
        let icons = en.resolve_query("fruit");
        assert!(icons.contains("apple"));
        assert!(icons.contains("banana"));
        assert!(!icons.contains("salad"));

        let de = TagIndex::for_locale("de");
        assert!(de.resolve_query("obst").contains("pear"));
    }

    #[test]
    fn registry_falls_back_for_unknown_locales() {
        let registry = TagRegistry::build("xx");
        assert_eq!(registry.index(None).locale(), "en");
        assert_eq!(registry.index(Some("de-AT")).locale(), "de");
        assert_eq!(registry.index(Some("fr")).locale(), "en");
        assert_eq!(registry.resolve_icon_tag("Manzana roja", "es"), Some("apple"));
        assert_eq!(registry.supported_locales(), vec!["de", "en", "es"]);
    }
}
