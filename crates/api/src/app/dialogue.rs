//! Style-templated avatar dialogue lines.
//!
//! Deterministic templating keyed on the avatar's presentation style. This is
//! the whole "AI" surface of the backend; a model integration would replace
//! `render` behind the same signature.

/// Produce a dialogue line for an avatar in its configured style.
pub fn render(name: &str, style: &str, context: &str) -> String {
    let intro = match style {
        "metaphorical" => format!("Greetings! I am {name}, your metaphorical mentor."),
        "mnemonic" => format!("Hello! I'm {name}, here to help you remember things better!"),
        "visual" => format!("Hi! I'm {name}, your visual guide."),
        "logical" => format!("Hello! I'm {name}, your logical assistant."),
        "cartoon" => format!("Hey there! I'm {name}, your friendly cartoon avatar!"),
        "cyberpunk" => format!("Greetings, human. I am {name}, your digital guide."),
        "futuristic" => format!("Hello, human. I am {name}, your futuristic companion."),
        _ => format!("Hi! I'm {name}, your avatar."),
    };

    format!("{intro} I'm here to help you with {context}. How can I assist you today?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_style_gets_its_intro() {
        let line = render("Neon Sage", "cyberpunk", "sorting algorithms");
        assert!(line.starts_with("Greetings, human. I am Neon Sage"));
        assert!(line.contains("sorting algorithms"));
    }

    #[test]
    fn unknown_style_falls_back_to_default() {
        let line = render("Blobby", "baroque", "fractions");
        assert!(line.starts_with("Hi! I'm Blobby, your avatar."));
    }
}
