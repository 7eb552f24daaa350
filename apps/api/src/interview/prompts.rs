// All LLM prompt constants for the interview module.
// Templates use `{placeholder}` markers replaced with `str::replace` before sending.

/// Opening question seeded on every reset. Replace `{track}`.
pub const OPENING_QUESTION_TEMPLATE: &str = "Hola. Veo que aplicas a la pasantía de {track}. \
    Para empezar, háblame de un proyecto difícil que hayas sacado adelante y qué rol exacto jugaste tú.";

/// The single word the classifier must answer with for a strong answer.
/// Matched case-insensitively as a substring of the model output.
pub const STRONG_KEYWORD: &str = "fuerte";

/// Classifier prompt. Replace `{question}` and `{answer}`.
pub const CLASSIFIER_PROMPT_TEMPLATE: &str = r#"Eres un evaluador estricto. Analiza la respuesta a la pregunta.
Pregunta: {question}
Respuesta: {answer}
Si la respuesta da ejemplos concretos, menciona tecnologías/herramientas o detalla el 'cómo', clasifícala como 'Fuerte'.
Si la respuesta usa clichés, es muy teórica, vaga o le falta detalle, clasifícala como 'Débil'.
Responde ÚNICAMENTE con la palabra: Fuerte o Débil.
Clasificación:"#;

/// Strong-branch follow-up. Replace `{answer}`.
pub const STRONG_FOLLOW_UP_TEMPLATE: &str = r#"El candidato respondió: '{answer}'.
Valida su respuesta brevemente (1 línea) y hazle una NUEVA pregunta técnica o de comportamiento más difícil sobre lo que acaba de mencionar.
Nueva Pregunta:"#;

/// Weak-branch follow-up. Replace `{answer}`.
pub const WEAK_FOLLOW_UP_TEMPLATE: &str = r#"El candidato respondió: '{answer}'.
Dile directamente y con tono profesional por qué su respuesta es insuficiente (muy general, sin ejemplos). EXÍGELE que te dé un ejemplo concreto de su vida académica o laboral que demuestre esa habilidad.
Tu respuesta:"#;

pub fn opening_question(track: &str) -> String {
    OPENING_QUESTION_TEMPLATE.replace("{track}", track)
}

/// Question is substituted last so an answer containing `{question}` stays literal.
pub fn classifier_prompt(question: &str, answer: &str) -> String {
    CLASSIFIER_PROMPT_TEMPLATE
        .replace("{answer}", answer)
        .replacen("{question}", question, 1)
}

pub fn strong_follow_up_prompt(answer: &str) -> String {
    STRONG_FOLLOW_UP_TEMPLATE.replace("{answer}", answer)
}

pub fn weak_follow_up_prompt(answer: &str) -> String {
    WEAK_FOLLOW_UP_TEMPLATE.replace("{answer}", answer)
}
