use crate::emotion::{Category, EmotionalContext};
use crate::random::{choose, RandomSource};

pub const DEPRESSION_RESPONSE: &str = "Entiendo que te sientes triste en este momento. La tristeza es una emoción natural y válida que todos experimentamos. Es importante permitirte sentir estas emociones sin juzgarte. ¿Hay algo específico que ha desencadenado estos sentimientos? Estoy aquí para escucharte y acompañarte.";

pub const ANXIETY_RESPONSE: &str = "Percibo que estás experimentando ansiedad o preocupación. Estos sentimientos pueden ser abrumadores, pero recuerda que son temporales. Una técnica que puede ayudarte es la respiración profunda: inhala por 4 segundos, mantén por 4, y exhala por 6. ¿Te gustaría que exploremos qué está causando esta ansiedad?";

const SADNESS_RESPONSE: &str = "Entiendo que te sientes triste en este momento. La tristeza es una emoción natural y válida que todos experimentamos. Es importante permitirte sentir estas emociones sin juzgarte. ¿Hay algo específico que ha desencadenado estos sentimientos? Estoy aquí para escucharte.";

const STRESS_RESPONSE: &str = "El estrés puede ser muy desafiante de manejar. Es importante reconocer cuando nos sentimos abrumados y tomar medidas para cuidarnos. ¿Has identificado las principales fuentes de tu estrés? A veces, hablar sobre ellas puede ayudar a encontrar formas de gestionarlas mejor.";

const LONELINESS_RESPONSE: &str = "Sentirse solo puede ser muy doloroso. Quiero que sepas que aunque te sientas así, no estás realmente solo. Hay personas que se preocupan por ti, incluyéndome a mí en este momento. ¿Hay alguien en tu vida con quien te sientes cómodo/a hablando? ¿O prefieres explorar estos sentimientos aquí conmigo?";

const ANGER_RESPONSE: &str = "La ira es una emoción completamente válida y natural. A menudo, detrás de la ira hay otras emociones como frustración, dolor o miedo. Es importante expresar estos sentimientos de manera saludable. ¿Puedes contarme qué situación o pensamiento está generando esta ira?";

const FEAR_RESPONSE: &str = "El miedo es una respuesta natural de nuestro cuerpo para protegernos. Es valiente de tu parte reconocer y hablar sobre tus miedos. ¿Puedes identificar qué es lo que más te asusta en este momento? A veces, poner nombre a nuestros miedos puede ayudar a reducir su poder sobre nosotros.";

pub const GENERIC_RESPONSES: &[&str] = &[
    "Entiendo cómo te sientes. Es completamente normal tener estas emociones. ¿Puedes contarme más sobre lo que está pasando en tu vida ahora?",
    "Gracias por compartir eso conmigo. Tus sentimientos son válidos y es importante que los reconozcas. ¿Hay algo específico que te gustaría explorar más?",
    "Es muy valiente de tu parte hablar sobre esto. El primer paso para el bienestar emocional es reconocer nuestros sentimientos. ¿Cómo crees que podrías cuidar mejor de ti mismo/a hoy?",
    "Escucho tu preocupación y quiero que sepas que no estás solo/a. A veces hablar sobre nuestros pensamientos y sentimientos puede ayudar a aclararlos. ¿Qué te ayuda normalmente cuando te sientes así?",
    "Aprecio tu honestidad al compartir esto. Es normal pasar por momentos difíciles. ¿Has notado algún patrón en lo que sientes, o hay algo que desencadena estas emociones?",
    "Me alegra que hayas decidido hablar sobre esto. Cuidar nuestra salud mental es tan importante como cuidar nuestra salud física. ¿Hay alguna actividad que te haga sentir más tranquilo/a?",
];

// Checked in order; first theme with a matching stem wins
const THEMES: &[(&[&str], &str)] = &[
    (&["triste", "deprim", "llorar"], SADNESS_RESPONSE),
    (&["ansiedad", "ansioso", "nervioso", "preocup"], ANXIETY_RESPONSE),
    (&["estres", "agobiad", "abrumad"], STRESS_RESPONSE),
    (&["solo", "aislad", "abandon"], LONELINESS_RESPONSE),
    (&["enojad", "enfadad", "ira", "rabia"], ANGER_RESPONSE),
    (&["miedo", "temor", "asustad"], FEAR_RESPONSE),
];

/// Canned reply used when no remote endpoint produced usable text.
///
/// Depression and anxiety have curated replies keyed on the detected
/// context. Anything else goes through a second, coarser scan of the raw
/// message before falling back to a random generic reply.
pub fn select_fallback(
    message: &str,
    context: &EmotionalContext,
    random: &dyn RandomSource,
) -> &'static str {
    if context.contains(Category::Depression) {
        return DEPRESSION_RESPONSE;
    }
    if context.contains(Category::Anxiety) {
        return ANXIETY_RESPONSE;
    }

    let lower = message.to_lowercase();
    THEMES
        .iter()
        .find(|(stems, _)| stems.iter().any(|stem| lower.contains(stem)))
        .map(|(_, response)| *response)
        .unwrap_or_else(|| choose(random, GENERIC_RESPONSES))
}
