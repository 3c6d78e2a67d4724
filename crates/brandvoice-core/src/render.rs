//! Example-copy renderer: a fixed lookup table keyed by the profile's lead
//! trait, lead emotion and formality band.

use crate::model::CanonicalProfile;

pub const NO_DATA_MESSAGE: &str = "Complete at least one input method to generate example copy.";

/// Prefix added when the profile leans towards storytelling.
pub const NARRATIVE_LEAD_IN: &str = "Imagine this scenario: ";

/// Storytelling preference above which the narrative lead-in is used.
const NARRATIVE_THRESHOLD: u8 = 7;

/// Formality level above which the "high" variant is chosen.
const HIGH_FORMALITY_THRESHOLD: u8 = 5;

const DEFAULT_EXAMPLE: &str = "Our company provides solutions designed to meet your needs. We focus on delivering quality results through our dedicated approach and attention to detail.";

/// (trait, emotion, formality band, copy)
const EXAMPLES: &[(&str, &str, &str, &str)] = &[
    (
        "innovative",
        "optimistic",
        "high",
        "Introducing our groundbreaking solution that transforms how businesses approach sustainability. Our innovative platform leverages cutting-edge technology to deliver unprecedented results while maintaining the highest environmental standards.",
    ),
    (
        "innovative",
        "optimistic",
        "low",
        "Check this out! We've created something totally new that's going to change how you think about sustainability. Our cool new tech makes amazing things happen while keeping things green!",
    ),
    (
        "innovative",
        "serious",
        "high",
        "We present a significant advancement in sustainability technology. Our proprietary solution addresses critical environmental challenges through methodical innovation and rigorous scientific application.",
    ),
    (
        "innovative",
        "serious",
        "low",
        "We've made a big breakthrough in green tech. Our new solution tackles serious environmental problems with smart innovation and solid science.",
    ),
    (
        "trustworthy",
        "optimistic",
        "high",
        "With our proven methodology and transparent approach, we deliver consistently reliable results. Our clients trust us to maintain the highest standards of integrity while achieving positive outcomes.",
    ),
    (
        "trustworthy",
        "optimistic",
        "low",
        "You can count on us to keep our promises and do things right. We're always straight with you, and we're here to help you win!",
    ),
    (
        "trustworthy",
        "serious",
        "high",
        "Our established protocols ensure dependable performance in all circumstances. We maintain strict adherence to ethical standards and provide comprehensive documentation of all processes.",
    ),
    (
        "trustworthy",
        "serious",
        "low",
        "We do what we say we'll do, every time. We don't cut corners, and we always tell you exactly what's happening.",
    ),
    (
        "playful",
        "optimistic",
        "high",
        "Embark on a delightful journey with our whimsical yet effective solutions. We infuse joy into every interaction while delivering results that exceed expectations.",
    ),
    (
        "playful",
        "optimistic",
        "low",
        "Let's have some fun with this! Our awesome solutions bring a smile to your face AND get amazing results. Win-win!",
    ),
    (
        "playful",
        "passionate",
        "high",
        "Discover the exhilarating combination of creativity and performance. Our enthusiastic approach transforms ordinary processes into extraordinary experiences.",
    ),
    (
        "playful",
        "passionate",
        "low",
        "We're super excited about making things fun! Our creative approach turns boring stuff into awesome experiences you'll love!",
    ),
    (
        "sophisticated",
        "calm",
        "high",
        "We offer refined solutions characterized by elegant simplicity and thoughtful design. Our measured approach ensures a seamless experience that reflects discerning taste.",
    ),
    (
        "sophisticated",
        "calm",
        "low",
        "Our stylish solutions are simple yet smart. We take a cool, collected approach to give you a smooth experience that shows real class.",
    ),
    (
        "sophisticated",
        "reassuring",
        "high",
        "Rest assured that our distinguished services provide both excellence and peace of mind. We attend to every detail with precision, ensuring a superior outcome.",
    ),
    (
        "sophisticated",
        "reassuring",
        "low",
        "Don't worry - our premium service has got you covered. We pay attention to all the little details so you get great results without the stress.",
    ),
];

/// Formality band used as the third lookup key.
pub fn formality_band(level: u8) -> &'static str {
    if level > HIGH_FORMALITY_THRESHOLD {
        "high"
    } else {
        "low"
    }
}

fn lookup(primary_trait: &str, primary_emotion: &str, band: &str) -> &'static str {
    EXAMPLES
        .iter()
        .find(|(t, e, b, _)| *t == primary_trait && *e == primary_emotion && *b == band)
        .map(|(_, _, _, copy)| *copy)
        .unwrap_or(DEFAULT_EXAMPLE)
}

/// Render example marketing copy for a profile.
pub fn render(profile: &CanonicalProfile) -> String {
    let (Some(primary_trait), Some(primary_emotion)) = (
        profile.personality.primary_traits.first(),
        profile.emotional_tone.primary_emotions.first(),
    ) else {
        return NO_DATA_MESSAGE.to_string();
    };

    let band = formality_band(profile.formality.level);
    let example = lookup(primary_trait, primary_emotion, band);

    if profile.communication_style.storytelling_preference > NARRATIVE_THRESHOLD {
        format!("{NARRATIVE_LEAD_IN}{example}")
    } else {
        example.to_string()
    }
}
