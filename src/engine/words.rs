//! Built-in word bank used by [`LocalEngine`](super::local::LocalEngine).

#[derive(Debug)]
pub struct WordEntry {
    pub word: &'static str,
    pub category: &'static str,
    pub definition: &'static str,
    pub hints: &'static [&'static str],
}

#[derive(Debug)]
pub struct WordList {
    pub language: &'static str,
    pub alphabet: &'static str,
    pub entries: &'static [WordEntry],
}

impl WordList {
    pub fn alphabet(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }
}

const fn entry(
    word: &'static str,
    category: &'static str,
    definition: &'static str,
    hints: &'static [&'static str],
) -> WordEntry {
    WordEntry {
        word,
        category,
        definition,
        hints,
    }
}

const SPANISH: &[WordEntry] = &[
    entry(
        "perro",
        "animales",
        "Mamifero domestico que ladra",
        &["Mejor amigo del hombre", "Mueve la cola"],
    ),
    entry(
        "caballo",
        "animales",
        "Animal que se monta y galopa",
        &["Tiene crin", "Usa herraduras"],
    ),
    entry(
        "conejo",
        "animales",
        "Roedor de orejas largas",
        &["Come zanahorias"],
    ),
    entry(
        "oso polar",
        "animales",
        "Gran carnivoro del artico",
        &["Es blanco", "Nada en aguas heladas"],
    ),
    entry(
        "araña",
        "animales",
        "Tiene ocho patas",
        &["Teje telas"],
    ),
    entry(
        "manzana",
        "comida",
        "Fruta del manzano",
        &["Puede ser roja o verde"],
    ),
    entry(
        "queso",
        "comida",
        "Se hace con leche cuajada",
        &["A los ratones les encanta"],
    ),
    entry(
        "pan",
        "comida",
        "Se hornea con harina y agua",
        &["Se compra en la panaderia"],
    ),
    entry(
        "naranja",
        "comida",
        "Fruta citrica",
        &["Tambien es un color"],
    ),
    entry(
        "ventana",
        "hogar",
        "Abertura en la pared",
        &["Tiene cristales"],
    ),
    entry(
        "almohada",
        "hogar",
        "Se usa para dormir",
        &["Apoyas la cabeza"],
    ),
    entry(
        "cuchara",
        "hogar",
        "Cubierto para la sopa",
        &["Tiene forma concava"],
    ),
];

const ENGLISH: &[WordEntry] = &[
    entry(
        "elephant",
        "animals",
        "Large mammal with a trunk",
        &["Never forgets", "Has tusks"],
    ),
    entry(
        "giraffe",
        "animals",
        "Tallest living animal",
        &["Very long neck"],
    ),
    entry(
        "polar bear",
        "animals",
        "Large carnivore of the arctic",
        &["White fur", "Swims in icy water"],
    ),
    entry(
        "rabbit",
        "animals",
        "Small mammal with long ears",
        &["Eats carrots"],
    ),
    entry(
        "cheese",
        "food",
        "Made from curdled milk",
        &["Mice love it"],
    ),
    entry(
        "bread",
        "food",
        "Baked from flour and water",
        &["Sold at a bakery", "Comes in loaves"],
    ),
    entry(
        "pancake",
        "food",
        "Flat cake cooked in a pan",
        &["Served with syrup"],
    ),
    entry(
        "orange",
        "food",
        "Citrus fruit",
        &["Also a colour"],
    ),
    entry(
        "window",
        "home",
        "Opening in a wall",
        &["Made of glass"],
    ),
    entry(
        "pillow",
        "home",
        "You rest your head on it",
        &["Found on a bed"],
    ),
    entry(
        "kettle",
        "home",
        "Used to boil water",
        &["It whistles"],
    ),
    entry(
        "guitar",
        "music",
        "String instrument with frets",
        &["Usually six strings"],
    ),
    entry(
        "trumpet",
        "music",
        "Brass instrument with valves",
        &["Played in jazz bands"],
    ),
];

pub const WORD_LISTS: &[WordList] = &[
    WordList {
        language: "es",
        alphabet: "abcdefghijklmnñopqrstuvwxyz",
        entries: SPANISH,
    },
    WordList {
        language: "en",
        alphabet: "abcdefghijklmnopqrstuvwxyz",
        entries: ENGLISH,
    },
];
