//! Language-tagged rule tables.
//!
//! Every rule is a plain pattern tagged with the language it was written
//! for. All tables are evaluated with the same logic; the tag only feeds
//! diagnostics. The compiled catalog is built once per process and shared
//! read-only between workers.

use std::sync::LazyLock;

use regex::Regex;

/// Language a rule was written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Script-independent rules
    Universal,
    English,
    Hindi,
    Chinese,
    Japanese,
    Korean,
    Spanish,
    French,
    German,
}

impl Language {
    /// Lowercase language name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Universal => "universal",
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Chinese => "chinese",
            Language::Japanese => "japanese",
            Language::Korean => "korean",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
        }
    }
}

type RuleTable = &'static [(Language, &'static [&'static str])];

/// Boilerplate markers, searched anywhere in the lower-cased line.
const NOISE_RULES: RuleTable = &[
    (
        Language::Universal,
        &[
            r"copyright|©|®|™",
            r"page \d+|页\s*\d+|ページ\s*\d+|페이지\s*\d+|página\s*\d+|seite\s*\d+",
            r"version|संस्करण|版本|バージョン|버전|versión",
            r"www\.|http|\.com|\.org",
            r"[.\-_]{4,}",
            r"^\d{1,2}:\d{2}|^\d{1,2}/\d{1,2}/\d{2,4}",
            r"^[^\w\s]*$",
        ],
    ),
    (
        Language::English,
        &[
            r"all rights reserved|confidential|internal use|draft",
            r"table of contents|\bindex\b",
        ],
    ),
    (
        Language::Hindi,
        &[
            r"सभी अधिकार सुरक्षित|गोपनीय|आंतरिक उपयोग|मसौदा",
            r"विषय सूची|अनुक्रमणिका",
        ],
    ),
    (Language::Chinese, &[r"版权所有|保密|内部使用|草稿", r"目录|索引"]),
    (Language::Japanese, &[r"著作権|機密|内部使用|下書き", r"目次|索引"]),
    (Language::Korean, &[r"저작권|기밀|내부 사용|초안", r"목차|색인"]),
    (
        Language::Spanish,
        &[
            r"derechos reservados|confidencial|uso interno|borrador",
            r"\bíndice\b|tabla de contenidos",
        ],
    ),
    (
        Language::French,
        &[
            r"droits réservés|confidentiel|usage interne|brouillon",
            r"table des matières",
        ],
    ),
    (
        Language::German,
        &[
            r"alle rechte vorbehalten|vertraulich|interne verwendung|entwurf",
            r"inhaltsverzeichnis",
        ],
    ),
];

/// Chapter/section numbering prefixes.
const NUMBERED_SECTION_RULES: RuleTable = &[
    (Language::Universal, &[r"^\d+(\.\d+)*\.?\s+"]),
    (Language::Chinese, &[r"^第[\d一二三四五六七八九十百]+[章节]"]),
    (Language::Japanese, &[r"^第[\d一二三四五六七八九十百]+[章節]"]),
    (Language::Korean, &[r"^\d+[장절]"]),
    (Language::Hindi, &[r"^(अध्याय|खंड)\s*\d+"]),
    (Language::Spanish, &[r"^(capítulo|sección)\s*\d+"]),
    (Language::French, &[r"^(chapitre|section)\s*\d+"]),
    (Language::German, &[r"^(kapitel|abschnitt)\s*\d+"]),
];

/// Appendix prefixes.
const APPENDIX_RULES: RuleTable = &[
    (Language::English, &[r"^appendix\s+[a-z]"]),
    (Language::Spanish, &[r"^anexo\s+[a-z]"]),
    (Language::French, &[r"^annexe\s+[a-z]"]),
    (Language::German, &[r"^anhang\s+[a-z]"]),
    (Language::Hindi, &[r"^परिशिष्ट\s*[a-z]"]),
    (Language::Chinese, &[r"^附录\s*[a-z]"]),
    (Language::Japanese, &[r"^付録\s*[a-z]"]),
    (Language::Korean, &[r"^부록\s*[a-z]"]),
];

/// Words that mark form instructions rather than headings.
const INSTRUCTION_WORDS: RuleTable = &[
    (
        Language::English,
        &["required", "please", "visit", "fill", "complete", "enter", "select"],
    ),
    (Language::Hindi, &["आवश्यक", "कृपया", "भरें", "पूरा", "दर्ज", "चुनें"]),
    (Language::Chinese, &["必需", "请", "填写", "完成", "输入", "选择"]),
    (
        Language::Japanese,
        &["必要", "してください", "記入", "完了", "入力", "選択"],
    ),
    (Language::Korean, &["필수", "제발", "채우다", "완료", "입력", "선택"]),
    (
        Language::Spanish,
        &["requerido", "por favor", "llenar", "completar", "entrar", "seleccionar"],
    ),
    (
        Language::French,
        &["requis", "s'il vous plaît", "remplir", "compléter", "entrer", "sélectionner"],
    ),
    (
        Language::German,
        &["erforderlich", "bitte", "ausfüllen", "vervollständigen", "eingeben", "auswählen"],
    ),
];

/// A compiled pattern with its language tag.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Language the rule was written for
    pub language: Language,
    /// Compiled pattern
    pub regex: Regex,
}

/// Compiled rule catalog.
#[derive(Debug)]
pub struct Catalog {
    noise: Vec<Rule>,
    numbered_sections: Vec<Rule>,
    appendix: Vec<Rule>,
    address: Regex,
    numeric_only: Regex,
    pub(crate) numeric_prefix: Regex,
    pub(crate) single_number: Regex,
    pub(crate) chapter_markers: Vec<Rule>,
    pub(crate) section_markers: Vec<Rule>,
    pub(crate) cjk_list_marker: Regex,
    pub(crate) circled_digit: Regex,
    pub(crate) korean_ordinal: Regex,
    pub(crate) devanagari_marker: Regex,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

/// The process-wide rule catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("catalog patterns are valid")
}

fn compile_table(table: RuleTable) -> Vec<Rule> {
    table
        .iter()
        .flat_map(|(language, patterns)| {
            patterns.iter().map(move |p| Rule {
                language: *language,
                regex: compile(&format!("(?i){}", p)),
            })
        })
        .collect()
}

fn first_match(rules: &[Rule], text: &str) -> Option<Language> {
    rules
        .iter()
        .find(|rule| rule.regex.is_match(text))
        .map(|rule| rule.language)
}

impl Catalog {
    fn build() -> Self {
        const CJK_NUMERAL: &str = r"[\d一二三四五六七八九十百]+";

        Self {
            noise: compile_table(NOISE_RULES),
            numbered_sections: compile_table(NUMBERED_SECTION_RULES),
            appendix: compile_table(APPENDIX_RULES),
            address: compile(r"^\d+\s+[A-Z\s]+$|^[A-Z\s]+,\s*[A-Z]{2}"),
            numeric_only: compile(r"^[\d\s\p{P}]+$"),
            numeric_prefix: compile(r"^\d+(?:\.\d+)*"),
            single_number: compile(r"^\d+\.?\s"),
            chapter_markers: vec![
                Rule {
                    language: Language::Chinese,
                    regex: compile(&format!("^第{}章", CJK_NUMERAL)),
                },
                Rule {
                    language: Language::Korean,
                    regex: compile(r"^\d+장"),
                },
                Rule {
                    language: Language::Hindi,
                    regex: compile(r"^अध्याय\s*\d+"),
                },
            ],
            section_markers: vec![
                Rule {
                    language: Language::Chinese,
                    regex: compile(&format!("^第{}[节節]", CJK_NUMERAL)),
                },
                Rule {
                    language: Language::Korean,
                    regex: compile(r"^\d+절"),
                },
                Rule {
                    language: Language::Hindi,
                    regex: compile(r"^(खंड|भाग)\s*\d+"),
                },
            ],
            cjk_list_marker: compile(r"[一二三四五六七八九十]、"),
            circled_digit: compile(r"[①②③④⑤⑥⑦⑧⑨⑩]"),
            korean_ordinal: compile(r"[가나다라마바사아자차카타파하]\."),
            devanagari_marker: compile(r"[०१२३४५६७८९]|अध्याय|भाग|खंड"),
        }
    }

    /// Language of the first noise rule matching the text.
    pub fn noise(&self, text: &str) -> Option<Language> {
        first_match(&self.noise, text)
    }

    /// Language of the first numbered-section prefix matching the text.
    pub fn numbered_section(&self, text: &str) -> Option<Language> {
        first_match(&self.numbered_sections, text)
    }

    /// Language of the first appendix prefix matching the text.
    pub fn appendix(&self, text: &str) -> Option<Language> {
        first_match(&self.appendix, text)
    }

    /// First instruction word contained in the text (case-insensitive).
    pub fn instruction_word(&self, text: &str) -> Option<(Language, &'static str)> {
        let lower = text.to_lowercase();
        INSTRUCTION_WORDS.iter().find_map(|(language, words)| {
            words
                .iter()
                .find(|word| lower.contains(*word))
                .map(|word| (*language, *word))
        })
    }

    /// Whether the text is made only of digits, punctuation and whitespace.
    pub fn is_numeric_only(&self, text: &str) -> bool {
        self.numeric_only.is_match(text)
    }

    /// Whether an upper-case line looks like a street address or city/state pair.
    pub fn is_address(&self, text: &str) -> bool {
        self.address.is_match(text)
    }
}
