//! Blueprint Assembler — builds the generation prompt and the fixed-shape website blueprint.
//!
//! Assembly is pure: the same idea and generated text always give the same document.
//! Only the business name, the description, and the about copy depend on input.

use serde::{Deserialize, Serialize};

use crate::name_extractor::extract_business_name;

/// Characters kept from the source text before the ellipsis is appended.
pub const DESCRIPTION_MAX_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

const HERO_CTA: &str = "Get Started Today";
const HERO_BACKGROUND: &str = "from-blue-600 to-purple-700";
const FONT_STACK: &str = "Inter, system-ui, sans-serif";

/// Root document handed to the front-end renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub title: String,
    pub description: String,
    pub sections: Vec<Section>,
    pub design: DesignTokens,
    pub pages: Vec<Page>,
}

/// One content block. Serialized with a `"type"` tag (`"hero"`, `"features"`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Section {
    Hero {
        headline: String,
        subtext: String,
        cta: String,
        background: String,
    },
    Features {
        title: String,
        items: Vec<FeatureCard>,
    },
    About {
        title: String,
        content: String,
    },
    Testimonials {
        title: String,
        items: Vec<Testimonial>,
    },
    Footer {
        text: String,
        links: Vec<FooterLink>,
    },
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Hero { .. } => SectionKind::Hero,
            Section::Features { .. } => SectionKind::Features,
            Section::About { .. } => SectionKind::About,
            Section::Testimonials { .. } => SectionKind::Testimonials,
            Section::Footer { .. } => SectionKind::Footer,
        }
    }
}

/// Section reference used by pages; pages never embed section copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    Features,
    About,
    Testimonials,
    Footer,
}

impl SectionKind {
    /// Order of sections in every blueprint.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Hero,
        SectionKind::Features,
        SectionKind::About,
        SectionKind::Testimonials,
        SectionKind::Footer,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCard {
    pub title: String,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub text: String,
    pub author: String,
    pub role: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    pub sections: Vec<SectionKind>,
    pub description: String,
}

/// Styling contract for the renderer. Constant; never derived from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTokens {
    #[serde(rename = "colorScheme")]
    pub color_scheme: ColorScheme,
    pub typography: Typography,
    pub layout: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub headings: String,
    pub body: String,
}

/// (title, icon, description)
const FEATURES: [(&str, &str, &str); 4] = [
    ("Professional Design", "⭐", "Modern and responsive design"),
    ("User Friendly", "👥", "Intuitive user experience"),
    ("Fast Performance", "⚡", "Optimized for speed"),
    ("Secure", "🔒", "Built with security in mind"),
];

/// (quote template, author, role). `{name}` is replaced with the business name.
const TESTIMONIALS: [(&str, &str, &str); 3] = [
    (
        "Excellent service and quality. {name} exceeded expectations!",
        "Alex Johnson",
        "Satisfied Client",
    ),
    (
        "Professional and reliable. Highly recommend {name}!",
        "Sam Wilson",
        "Happy Customer",
    ),
    (
        "Outstanding experience. {name} truly cares about clients.",
        "Jordan Lee",
        "Loyal Customer",
    ),
];

const TESTIMONIAL_RATING: u8 = 5;

const FOOTER_LINKS: [(&str, &str); 3] = [
    ("Privacy Policy", "#privacy"),
    ("Terms of Service", "#terms"),
    ("Contact Us", "#contact"),
];

const PAGES: [(&str, &[SectionKind], &str); 4] = [
    ("Home", &SectionKind::ALL, "Main landing page showcasing key features"),
    (
        "About",
        &[SectionKind::Hero, SectionKind::About, SectionKind::Footer],
        "Company information and story",
    ),
    (
        "Services",
        &[SectionKind::Hero, SectionKind::Features, SectionKind::Footer],
        "Overview of services offered",
    ),
    (
        "Contact",
        &[SectionKind::Hero, SectionKind::Footer],
        "Contact information and inquiry form",
    ),
];

/// Instruction sent to the text generator. The idea is embedded verbatim.
pub fn create_design_prompt(idea: &str) -> String {
    format!(
        "\nCreate a professional website design concept for: {idea}\n\
         \n\
         Generate:\n\
         1. A catchy business name and headline\n\
         2. Engaging value proposition\n\
         3. Key features and services\n\
         4. Customer testimonials\n\
         5. Call-to-action phrases\n\
         \n\
         Make it specific and professional.\n"
    )
}

/// Hero subtext and blueprint description: generated text when present, else the idea,
/// cut to [`DESCRIPTION_MAX_CHARS`] characters with an ellipsis when longer.
pub fn derive_description(generated: &str, idea: &str) -> String {
    let source = if generated.is_empty() { idea } else { generated };
    truncate_with_ellipsis(source, DESCRIPTION_MAX_CHARS)
}

fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
        None => s.to_string(),
    }
}

/// Assembles the blueprint for an idea and the (possibly empty) generated text.
pub fn assemble_blueprint(idea: &str, generated: &str) -> Blueprint {
    let name = extract_business_name(idea);
    let description = derive_description(generated, idea);

    let about_content = if generated.is_empty() {
        format!("{name} is dedicated to providing exceptional service and value to our customers.")
    } else {
        generated.to_string()
    };

    let sections = vec![
        Section::Hero {
            headline: format!("Welcome to {name}"),
            subtext: description.clone(),
            cta: HERO_CTA.to_string(),
            background: HERO_BACKGROUND.to_string(),
        },
        Section::Features {
            title: "Key Features".to_string(),
            items: FEATURES
                .iter()
                .map(|(title, icon, description)| FeatureCard {
                    title: title.to_string(),
                    icon: icon.to_string(),
                    description: description.to_string(),
                })
                .collect(),
        },
        Section::About {
            title: format!("About {name}"),
            content: about_content,
        },
        Section::Testimonials {
            title: "What Our Customers Say".to_string(),
            items: TESTIMONIALS
                .iter()
                .map(|(text, author, role)| Testimonial {
                    text: text.replace("{name}", &name),
                    author: author.to_string(),
                    role: role.to_string(),
                    rating: TESTIMONIAL_RATING,
                })
                .collect(),
        },
        Section::Footer {
            text: format!("© 2025 {name} — Powered by AI Design"),
            links: FOOTER_LINKS
                .iter()
                .map(|(text, url)| FooterLink {
                    text: text.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        },
    ];

    let pages = PAGES
        .iter()
        .map(|(page_name, kinds, page_description)| Page {
            name: page_name.to_string(),
            sections: kinds.to_vec(),
            description: page_description.to_string(),
        })
        .collect();

    Blueprint {
        title: name,
        description,
        sections,
        design: default_design(),
        pages,
    }
}

fn default_design() -> DesignTokens {
    DesignTokens {
        color_scheme: ColorScheme {
            primary: "#6366f1".to_string(),
            secondary: "#8b5cf6".to_string(),
            accent: "#06b6d4".to_string(),
        },
        typography: Typography {
            headings: FONT_STACK.to_string(),
            body: FONT_STACK.to_string(),
        },
        layout: "modern-grid".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_idea_and_five_categories() {
        let prompt = create_design_prompt("a vegan bakery");
        assert!(prompt.contains("Create a professional website design concept for: a vegan bakery"));
        for n in 1..=5 {
            assert!(prompt.contains(&format!("{n}. ")), "missing item {n}");
        }
        assert!(prompt.contains("Call-to-action phrases"));
    }

    #[test]
    fn description_uses_generated_text_when_present() {
        assert_eq!(derive_description("Fresh bread daily.", "idea"), "Fresh bread daily.");
    }

    #[test]
    fn description_falls_back_to_idea() {
        assert_eq!(derive_description("", "a vegan bakery"), "a vegan bakery");
    }

    #[test]
    fn description_truncates_long_text() {
        let long = "x".repeat(250);
        let out = derive_description(&long, "idea");
        assert_eq!(out.chars().count(), 203);
        assert!(out.ends_with("..."));

        let exact = "y".repeat(200);
        assert_eq!(derive_description(&exact, "idea"), exact);

        let long_idea = "z".repeat(201);
        assert_eq!(derive_description("", &long_idea), format!("{}...", "z".repeat(200)));
    }

    #[test]
    fn description_counts_characters_not_bytes() {
        let text = "é".repeat(201);
        let out = derive_description(&text, "idea");
        assert_eq!(out, format!("{}...", "é".repeat(200)));
    }

    #[test]
    fn sections_and_pages_have_fixed_shape() {
        for (idea, generated) in [("a vegan bakery", ""), ("x", "some text"), ("", "")] {
            let bp = assemble_blueprint(idea, generated);
            let kinds: Vec<SectionKind> = bp.sections.iter().map(Section::kind).collect();
            assert_eq!(kinds, SectionKind::ALL.to_vec());
            let names: Vec<&str> = bp.pages.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, ["Home", "About", "Services", "Contact"]);
        }
    }

    #[test]
    fn empty_generation_uses_idea_derived_copy() {
        let bp = assemble_blueprint("an app called Pixel Forge for designers", "");
        assert_eq!(bp.title, "Pixel Forge");
        assert_eq!(bp.description, "an app called Pixel Forge for designers");
        match &bp.sections[0] {
            Section::Hero { headline, subtext, cta, .. } => {
                assert_eq!(headline, "Welcome to Pixel Forge");
                assert_eq!(subtext, "an app called Pixel Forge for designers");
                assert_eq!(cta, "Get Started Today");
            }
            other => panic!("expected hero, got {other:?}"),
        }
        match &bp.sections[2] {
            Section::About { title, content } => {
                assert_eq!(title, "About Pixel Forge");
                assert_eq!(
                    content,
                    "Pixel Forge is dedicated to providing exceptional service and value to our customers."
                );
            }
            other => panic!("expected about, got {other:?}"),
        }
    }

    #[test]
    fn generated_text_fills_about_verbatim() {
        let generated = "g".repeat(300);
        let bp = assemble_blueprint("a vegan bakery", &generated);
        match &bp.sections[2] {
            Section::About { content, .. } => assert_eq!(content, &generated),
            other => panic!("expected about, got {other:?}"),
        }
        assert_eq!(bp.description.chars().count(), 203);
    }

    #[test]
    fn testimonials_and_footer_interpolate_name() {
        let bp = assemble_blueprint(r#"a shop "Acme""#, "");
        match &bp.sections[3] {
            Section::Testimonials { items, .. } => {
                assert_eq!(items.len(), 3);
                assert!(items.iter().all(|t| t.text.contains("Acme") && t.rating == 5));
            }
            other => panic!("expected testimonials, got {other:?}"),
        }
        match &bp.sections[4] {
            Section::Footer { text, links } => {
                assert_eq!(text, "© 2025 Acme — Powered by AI Design");
                assert_eq!(links.len(), 3);
            }
            other => panic!("expected footer, got {other:?}"),
        }
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(assemble_blueprint("a vegan bakery", "")).unwrap();
        assert_eq!(json["sections"][0]["type"], "hero");
        assert_eq!(json["sections"][1]["items"].as_array().map(Vec::len), Some(4));
        assert_eq!(json["design"]["colorScheme"]["primary"], "#6366f1");
        assert_eq!(json["design"]["layout"], "modern-grid");
        assert_eq!(json["pages"][1]["sections"], serde_json::json!(["hero", "about", "footer"]));
    }

    #[test]
    fn assembly_is_deterministic() {
        let a = serde_json::to_string(&assemble_blueprint("a vegan bakery", "text")).unwrap();
        let b = serde_json::to_string(&assemble_blueprint("a vegan bakery", "text")).unwrap();
        assert_eq!(a, b);
    }
}
