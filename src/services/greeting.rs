// src/services/greeting.rs
//
// Canned replies for trivial greetings, answered without an upstream call.

pub const MAX_GREETING_WORDS: usize = 5;

const GREETING_PATTERNS: &[&str] = &[
    // en
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    // de
    "hallo",
    "guten morgen",
    "guten tag",
    "guten abend",
    "servus",
    "moin",
    // fr
    "bonjour",
    "bonsoir",
    "salut",
    // es
    "hola",
    "buenos dias",
    "buenos días",
    "buenas tardes",
    "buenas noches",
    // it
    "ciao",
    "buongiorno",
    "buonasera",
    // pt
    "olá",
    "ola",
    "oi",
    "bom dia",
    "boa tarde",
    "boa noite",
    // ar
    "مرحبا",
    "أهلا",
    "اهلا",
    "السلام عليكم",
    "صباح الخير",
    "مساء الخير",
    // ru
    "привет",
    "здравствуйте",
    "доброе утро",
    "добрый день",
    "добрый вечер",
    // zh
    "你好",
    "您好",
    "早上好",
    "晚上好",
];

const GREETING_EN: &str = "Hello! 👋 How can I help you today?\n\
You can ask me about Dennis, Denarixx, his projects, or general questions about creativity and AI.";

const GREETING_DE: &str = "Hallo! 👋 Wie kann ich dir heute helfen?\n\
Du kannst mir Fragen zu Dennis Charles, seinen Projekten, Denarixx oder zu kreativen Themen mit KI stellen.";

const GREETING_FR: &str = "Bonjour ! 👋 Comment puis-je t'aider aujourd'hui ?\n\
Tu peux me poser des questions sur Dennis, Denarixx, ses projets ou des sujets liés à la créativité et à l'IA.";

const GREETING_ES: &str = "¡Hola! 👋 ¿Cómo puedo ayudarte hoy?\n\
Puedes preguntarme sobre Dennis, sus proyectos, Denarixx o temas generales de creatividad e inteligencia artificial.";

const GREETING_IT: &str = "Ciao! 👋 Come posso aiutarti oggi?\n\
Puoi chiedermi di Dennis, dei suoi progetti, di Denarixx o di temi generali su creatività e intelligenza artificiale.";

const GREETING_PT: &str = "Olá! 👋 Como posso ajudar você hoje?\n\
Você pode me perguntar sobre o Dennis, os projetos dele, a Denarixx ou temas gerais de criatividade e inteligência artificial.";

const GREETING_AR: &str = "مرحباً! 👋 كيف يمكنني مساعدتك اليوم؟\n\
يمكنك طرح أسئلة حول دينيس تشارلز، مشروع Denarixx، أو مواضيع عامة عن الإبداع والذكاء الاصطناعي.";

const GREETING_RU: &str = "Привет! 👋 Чем я могу помочь сегодня?\n\
Вы можете спросить меня о Деннисе, его проектах, Denarixx или об общих темах творчества и искусственного интеллекта.";

const GREETING_ZH: &str = "你好！👋 今天我能帮你什么？\n\
你可以问我关于 Dennis、Denarixx、他的项目，或者关于创意和人工智能的一般问题。";

/// True when `message` matches a greeting pattern and stays within
/// `MAX_GREETING_WORDS` words.
pub fn is_simple_greeting(message: &str) -> bool {
    let lowered = message.trim().to_lowercase();
    if lowered.is_empty() || word_count(&lowered) > MAX_GREETING_WORDS {
        return false;
    }

    let words = tokenize(&lowered);
    GREETING_PATTERNS
        .iter()
        .any(|pattern| matches_pattern(&lowered, &words, pattern))
}

/// Canned greeting for an uppercase language code; unknown codes get English.
pub fn canned_greeting(language: &str) -> &'static str {
    match language {
        "DE" => GREETING_DE,
        "FR" => GREETING_FR,
        "ES" => GREETING_ES,
        "IT" => GREETING_IT,
        "PT" => GREETING_PT,
        "AR" => GREETING_AR,
        "RU" => GREETING_RU,
        "ZH" => GREETING_ZH,
        _ => GREETING_EN,
    }
}

// Latin patterns match whole words so that "this" never counts as "hi".
// Other scripts are matched as substrings since CJK has no word breaks.
fn matches_pattern(lowered: &str, words: &[&str], pattern: &str) -> bool {
    let is_latin = pattern
        .chars()
        .all(|c| c.is_whitespace() || c.is_ascii() || ('\u{00C0}'..='\u{024F}').contains(&c));
    if !is_latin {
        return lowered.contains(pattern);
    }

    let needle: Vec<&str> = pattern.split_whitespace().collect();
    words.windows(needle.len()).any(|w| w == needle.as_slice())
}

// Unsegmented scripts have no spaces, so each ideograph counts as a word.
// Punctuation only separates.
fn word_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;
    for c in text.chars() {
        if is_unsegmented(c) {
            count += 1;
            in_word = false;
        } else if !c.is_alphanumeric() {
            in_word = false;
        } else if !in_word {
            count += 1;
            in_word = true;
        }
    }
    count
}

fn is_unsegmented(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'   // kana
        | '\u{3400}'..='\u{4DBF}' // CJK extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK unified
        | '\u{AC00}'..='\u{D7AF}' // hangul
        | '\u{F900}'..='\u{FAFF}')
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}
