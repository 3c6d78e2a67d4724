use brandvoice_analyze::{TextAnalysis, SECTIONS};
use brandvoice_core::adjust::{Adjustment, ProfileAdjustments};
use brandvoice_core::merge::MergeReport;
use brandvoice_core::model::{
    CanonicalProfile, FieldValue, ListField, NumericField, PartialParameterSet,
};
use brandvoice_core::session::BrandSession;

use super::OutputFormat;

pub fn format_profile(profile: &CanonicalProfile, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(profile).unwrap_or_default(),
        OutputFormat::Markdown => profile.to_markdown(),
        OutputFormat::Text => format_profile_text(profile),
    }
}

fn format_profile_text(p: &CanonicalProfile) -> String {
    let mut out = String::new();

    out.push_str(&format!("Traits:     {}\n", join(&p.personality.primary_traits)));
    out.push_str(&format!("            {}\n", join(&p.personality.secondary_traits)));
    if !p.personality.traits_to_avoid.is_empty() {
        out.push_str(&format!("Avoid:      {}\n", join(&p.personality.traits_to_avoid)));
    }

    out.push_str(&format!(
        "Emotions:   {} (intensity {}/10)\n",
        join(&p.emotional_tone.primary_emotions),
        p.emotional_tone.intensity
    ));
    out.push_str(&format!("            {}\n", join(&p.emotional_tone.secondary_emotions)));
    if !p.emotional_tone.emotions_to_avoid.is_empty() {
        out.push_str(&format!(
            "Avoid:      {}\n",
            join(&p.emotional_tone.emotions_to_avoid)
        ));
    }

    out.push_str(&format!("Formality:  {}/10\n", p.formality.level));

    if !p.vocabulary.preferred_terms.is_empty() {
        out.push_str(&format!("Preferred:  {}\n", join(&p.vocabulary.preferred_terms)));
    }
    if !p.vocabulary.restricted_terms.is_empty() {
        out.push_str(&format!("Restricted: {}\n", join(&p.vocabulary.restricted_terms)));
    }
    out.push_str(&format!(
        "Jargon:     {}/10, technical complexity {}/10\n",
        p.vocabulary.jargon_level, p.vocabulary.technical_complexity
    ));

    let style = &p.communication_style;
    out.push_str(&format!(
        "Style:      storytelling {}/10, sentence length {}/10, complexity {}/10\n",
        style.storytelling_preference,
        style.sentence_length_preference,
        style.sentence_complexity_preference
    ));
    if !style.rhetorical_devices.is_empty() {
        out.push_str(&format!("Devices:    {}\n", join(&style.rhetorical_devices)));
    }
    if !style.cta_style.is_empty() {
        out.push_str(&format!("CTA:        {}\n", style.cta_style));
    }

    let notes = [
        ("Contexts", &p.formality.context_variations),
        ("Audience", &p.audience_adaptation.audience_segments),
        ("Channels", &p.audience_adaptation.channel_adaptations),
        ("Journey", &p.audience_adaptation.journey_stage_adaptations),
    ];
    for (label, map) in notes {
        for (context, note) in map {
            out.push_str(&format!("{:<12}{note} ({context})\n", format!("{label}:")));
        }
    }
    out
}

pub fn format_status(session: &BrandSession, fmt: OutputFormat) -> String {
    let status = session.get_method_status();
    match fmt {
        OutputFormat::Json => {
            let methods: serde_json::Map<String, serde_json::Value> = status
                .iter()
                .map(|(method, s)| {
                    (
                        method.to_string(),
                        serde_json::to_value(s).unwrap_or_default(),
                    )
                })
                .collect();
            serde_json::to_string_pretty(&serde_json::json!({
                "session": session.id().as_str(),
                "created_at": session.created_at(),
                "methods": methods,
                "adjustments": session.adjustments(),
            }))
            .unwrap_or_default()
        }
        OutputFormat::Text | OutputFormat::Markdown => {
            let mut out = format!(
                "Session {} (started {})\n\n",
                session.id().short(),
                session.created_at().format("%Y-%m-%d %H:%M")
            );
            for (method, s) in &status {
                let mark = if s.used { "\u{2713}" } else { " " };
                out.push_str(&format!("[{mark}] {:<16} {method}", method.label()));
                if let Some(at) = s.updated_at {
                    out.push_str(&format!("  {}", at.format("%Y-%m-%d %H:%M")));
                }
                if let Some(source) = &s.source {
                    out.push_str(&format!("  {source}"));
                }
                out.push('\n');
            }
            if !session.any_used() {
                out.push_str("\nNo input method has run yet; the profile shows defaults.\n");
            }
            let adjustments = session.adjustments();
            if !adjustments.is_empty() {
                out.push_str(&format!("\n{} field(s) adjusted by hand:\n", adjustments.len()));
                out.push_str(&adjustment_lines(&adjustments));
            }
            out
        }
    }
}

pub fn format_adjustments(adjustments: &ProfileAdjustments, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(adjustments).unwrap_or_default(),
        OutputFormat::Text | OutputFormat::Markdown => {
            if adjustments.is_empty() {
                return "No manual adjustments.".to_string();
            }
            adjustment_lines(adjustments)
        }
    }
}

fn adjustment_lines(adjustments: &ProfileAdjustments) -> String {
    let mut out = String::new();
    for (path, adjustment) in adjustments.iter() {
        let shown = match adjustment {
            Adjustment::Level(v) => v.to_string(),
            Adjustment::List(items) => format!("[{}]", items.join(", ")),
            Adjustment::Note(text) => format!("\"{text}\""),
        };
        out.push_str(&format!("  {path} = {shown}\n"));
    }
    out
}

pub fn format_report(report: &MergeReport, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Text | OutputFormat::Markdown => report.to_markdown(),
    }
}

pub fn format_analysis(
    analysis: &TextAnalysis,
    params: &PartialParameterSet,
    fmt: OutputFormat,
) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(params).unwrap_or_default(),
        OutputFormat::Text | OutputFormat::Markdown => {
            let mut out = format!(
                "{} words in {} sentences ({:.1} words per sentence)\n\n",
                analysis.word_count, analysis.sentence_count, analysis.avg_sentence_words
            );
            for field in ListField::ALL {
                if let FieldValue::List(items) = field.read(params) {
                    out.push_str(&format!("{:<42} {}\n", field.path(), items.join(", ")));
                }
            }
            for field in NumericField::ALL {
                if let Some(level) = field.read(params).as_scalar() {
                    out.push_str(&format!("{:<42} {level}\n", field.path()));
                }
            }
            out
        }
    }
}

pub fn format_questions(fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(SECTIONS).unwrap_or_default(),
        OutputFormat::Text | OutputFormat::Markdown => {
            let mut out = String::new();
            for section in SECTIONS {
                out.push_str(&format!("## {}\n\n", section.name));
                for q in section.questions {
                    out.push_str(&format!("- `{}`: {}", q.name, q.prompt));
                    if let Some(max) = q.max_selections {
                        out.push_str(&format!(" (pick up to {max})"));
                    }
                    out.push('\n');
                    if !q.options.is_empty() {
                        out.push_str(&format!("  options: {}\n", q.options.join(", ")));
                    }
                }
                out.push('\n');
            }
            out
        }
    }
}

fn join(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
