//! HTML page generation.
//!
//! Renders the effective content document into a single self-contained
//! `index.html`: inline CSS, no JavaScript, in-page anchor navigation.
//!
//! ## Page Layout
//!
//! | Anchor | Section | Content fields |
//! |--------|---------|----------------|
//! | `#inicio` | Hero | `hero.*` |
//! | `#titulo-central` | Intro | fixed copy |
//! | `#oracion` | Prayer times | `prayers[]` |
//! | `#comunidad` | Parish life | `community.*` |
//! | `#servicios` / `#acerca` | Mass schedule + sacrament costs | `schedules[]`, `costs[]` |
//! | `#contacto` | Location and office | `contact.*` |
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html      # The page
//! └── content.json    # Effective document the page was rendered from
//! ```
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time. Palette custom properties
//! generated from `site.toml` are prepended to it.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All content is interpolated with automatic escaping, so remote content
//! cannot inject markup.

use crate::config::{self, SiteConfig};
use crate::content::{Community, ContentDocument, Contact, Cost, Hero, Prayer, Schedule};
use crate::loader::ContentState;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Header navigation: (anchor, label).
const NAV_LINKS: &[(&str, &str)] = &[
    ("acerca", "ACERCA DE"),
    ("servicios", "HORARIOS"),
    ("oracion", "ORACIÓN"),
    ("comunidad", "COMUNIDAD"),
    ("contacto", "CONTACTO"),
];

/// Paths written by [`generate`].
#[derive(Debug, Clone)]
pub struct GeneratedSite {
    pub index: PathBuf,
    pub content_json: PathBuf,
}

/// Render the page for `state` into `output_dir`.
pub fn generate(
    state: &ContentState,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GeneratedSite, GenerateError> {
    let doc = state.document();
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );

    fs::create_dir_all(output_dir)?;

    let page = render_page(&doc, config, &css, state.is_loading());
    let index = output_dir.join("index.html");
    fs::write(&index, page.into_string())?;

    let content_json = output_dir.join("content.json");
    fs::write(&content_json, serde_json::to_string_pretty(&*doc)?)?;

    log::debug!("Wrote {} and {}", index.display(), content_json.display());
    Ok(GeneratedSite {
        index,
        content_json,
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, lang: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Sticky header: site title, anchor nav, call-to-action.
fn site_header(config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            div.container {
                div.nav-grid {
                    div.site-title {
                        (config.site.title_prefix) " "
                        span { (config.site.title_highlight) }
                    }
                    nav.site-nav {
                        @for (anchor, label) in NAV_LINKS {
                            a href={ "#" (anchor) } { (label) }
                        }
                    }
                    div.nav-cta {
                        a.button.button-small href="#contacto" { "RESERVAR CELEBRACIÓN" }
                    }
                }
            }
        }
    }
}

fn hero_section(hero: &Hero) -> Markup {
    let alt = format!("{} {}", hero.title_prefix, hero.title_highlight);
    html! {
        section.hero id="inicio" {
            div.container {
                div.hero-image {
                    img src=(hero.image_url) alt=(alt);
                }
                h1 {
                    (hero.title_prefix) " "
                    span { (hero.title_highlight) }
                }
                div.hero-chip { (hero.chip) }
                p.hero-subtitle { (hero.subtitle) }
                div.hero-actions {
                    a.button.button-secondary href="#servicios" { "VER HORARIOS DE MISA" }
                    a.button.button-primary href="#contacto" { "SOLICITAR INFORMACIÓN" }
                }
            }
        }
    }
}

fn intro_section(config: &SiteConfig) -> Markup {
    html! {
        section.section-centered id="titulo-central" {
            div.container {
                h2.section-title-main {
                    (config.site.title_highlight) " · Misas y celebraciones"
                }
                p.section-text {
                    "Consulta horarios de misa, devociones, costos de sacramentos, \
                     ubicación del templo y mira algunos detalles de la vida parroquial."
                }
            }
        }
    }
}

fn prayers_section(prayers: &[Prayer]) -> Markup {
    html! {
        section.section-soft id="oracion" {
            div.container {
                div.section-header {
                    h3.section-title { "Momentos de oración" }
                    p.section-text {
                        "Espacios para rezar, agradecer y acompañar: rosario, adoración, \
                         confesiones y grupos parroquiales."
                    }
                }
                div.card-grid {
                    @for prayer in prayers {
                        article.card.prayer-card {
                            h4 { (prayer.title) }
                            p { (prayer.description) }
                            span.card-schedule { (prayer.schedule) }
                        }
                    }
                }
            }
        }
    }
}

fn community_section(community: &Community) -> Markup {
    html! {
        section.section-cream id="comunidad" {
            div.container {
                div.section-header {
                    h3.section-title { (community.section_title) }
                    p.section-text { (community.section_subtitle) }
                }
                div.card-grid {
                    @for photo in &community.photos {
                        article.card.story-card {
                            img src=(photo.img_url) alt=(photo.title) loading="lazy";
                            div.story-body {
                                h4 { (photo.title) }
                                p { (photo.text) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Schedules and costs side by side. The schedules block carries the `#acerca` anchor.
fn services_section(schedules: &[Schedule], costs: &[Cost]) -> Markup {
    html! {
        section id="servicios" {
            div.container {
                div.info-grid {
                    div.info-block id="acerca" {
                        h3.section-title { "Horarios de misa" }
                        p.section-text {
                            "Sustituye estos horarios por los reales de tu parroquia."
                        }
                        ul.schedule-list {
                            @for schedule in schedules {
                                li data-schedule-id=(schedule.id) {
                                    span.schedule-label { (schedule.label) }
                                    span.schedule-hours { (schedule.hours) }
                                    @if let Some(note) = &schedule.note {
                                        span.schedule-note { (note) }
                                    }
                                }
                            }
                        }
                    }
                    div.info-block {
                        h3.section-title { "Costos de sacramentos" }
                        p.section-text {
                            "Solo referencia visual. Luego ajustas montos, requisitos y \
                             ofrendas según tu parroquia."
                        }
                        div.cost-list {
                            @for cost in costs {
                                div.cost-row {
                                    span.cost-label { (cost.label) }
                                    span.cost-price { (cost.price) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn contact_section(contact: &Contact) -> Markup {
    html! {
        section.section-soft id="contacto" {
            div.container {
                div.contact-layout {
                    div {
                        h3.section-title { (contact.title) }
                        p.section-text { (contact.description) }
                        div.contact-details {
                            p { (contact.address) }
                            p { "Teléfono: " (contact.phone) }
                            p { "Oficina: " (contact.office_hours) }
                            p {
                                "Correo: "
                                a href={ "mailto:" (contact.email) } { (contact.email) }
                            }
                        }
                        div.contact-actions {
                            a.button.button-primary href={ "mailto:" (contact.email) } {
                                "SOLICITAR INFORMACIÓN"
                            }
                            a.button.button-secondary href="#contacto" { "VER CÓMO LLEGAR" }
                        }
                    }
                    div.map-placeholder {
                        span { "Mapa de ubicación" }
                        small { "(Reemplaza por tu iframe de Google Maps)" }
                    }
                }
            }
        }
    }
}

fn loading_indicator() -> Markup {
    html! {
        div.loading-indicator role="status" { "Cargando contenido de la parroquia..." }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the whole page from an effective document.
///
/// `loading` adds the transient loading indicator; a settled state never has it.
pub fn render_page(doc: &ContentDocument, config: &SiteConfig, css: &str, loading: bool) -> Markup {
    let title = format!(
        "{} {}",
        config.site.title_prefix, config.site.title_highlight
    );

    let content = html! {
        (site_header(config))
        main {
            (hero_section(&doc.hero))
            (intro_section(config))
            (prayers_section(&doc.prayers))
            (community_section(&doc.community))
            (services_section(&doc.schedules, &doc.costs))
            (contact_section(&doc.contact))
        }
        @if loading {
            (loading_indicator())
        }
    };

    base_document(&title, &config.site.lang, css, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PartialContentDocument, default_content, merge};
    use tempfile::TempDir;

    fn render_default(loading: bool) -> String {
        render_page(default_content(), &SiteConfig::default(), "", loading).into_string()
    }

    #[test]
    fn base_document_includes_doctype_and_lang() {
        let content = html! { p { "test" } };
        let doc = base_document("Test", "es", "body {}", content).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<html lang="es">"#));
        assert!(doc.contains("<title>Test</title>"));
    }

    #[test]
    fn header_links_every_anchor() {
        let header = site_header(&SiteConfig::default()).into_string();
        for (anchor, label) in NAV_LINKS {
            assert!(header.contains(&format!(r##"href="#{anchor}""##)));
            assert!(header.contains(label));
        }
        assert!(header.contains("RESERVAR CELEBRACIÓN"));
    }

    #[test]
    fn page_has_every_section_anchor() {
        let html = render_default(false);
        for id in [
            "inicio",
            "titulo-central",
            "oracion",
            "comunidad",
            "servicios",
            "acerca",
            "contacto",
        ] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
    }

    #[test]
    fn hero_renders_title_parts() {
        let html = hero_section(&default_content().hero).into_string();
        assert!(html.contains("Comunidad de <span>San José</span>"));
        assert!(html.contains("Misas · Sacramentos · Comunidad"));
        assert!(html.contains("pexels-photo-29843273.jpeg"));
    }

    #[test]
    fn page_renders_one_card_per_prayer_and_photo() {
        let html = render_default(false);
        assert_eq!(html.matches("prayer-card").count(), 3);
        assert_eq!(html.matches("story-card").count(), 3);
        assert!(html.contains("Adoración al Santísimo"));
        assert!(html.contains("Altar y velas"));
    }

    #[test]
    fn schedules_render_notes_only_when_present() {
        let schedules = vec![
            Schedule {
                id: "weekday".to_string(),
                label: "Lunes a viernes".to_string(),
                hours: "07:00".to_string(),
                note: None,
            },
            Schedule {
                id: "sunday".to_string(),
                label: "Domingo".to_string(),
                hours: "12:00".to_string(),
                note: Some("Misa familiar".to_string()),
            },
        ];
        let html = services_section(&schedules, &[]).into_string();
        assert_eq!(html.matches("schedule-note").count(), 1);
        assert!(html.contains("Misa familiar"));
        assert!(html.contains(r#"data-schedule-id="weekday""#));
    }

    #[test]
    fn costs_render_label_and_price() {
        let html = render_default(false);
        assert_eq!(html.matches(r#"class="cost-row""#).count(), 4);
        assert!(html.contains("$3,000 MXN"));
    }

    #[test]
    fn contact_renders_mailto() {
        let html = contact_section(&default_content().contact).into_string();
        assert!(html.contains(r#"href="mailto:parroquia.sanjose@ejemplo.com""#));
        assert!(html.contains("Teléfono: (000) 000 00 00"));
        assert!(html.contains("Oficina: Lunes a viernes"));
    }

    #[test]
    fn loading_indicator_only_while_loading() {
        assert!(render_default(true).contains("loading-indicator"));
        assert!(!render_default(false).contains("loading-indicator"));
    }

    #[test]
    fn site_title_comes_from_config() {
        let mut config = SiteConfig::default();
        config.site.title_highlight = "Santa María".to_string();
        let html = render_page(default_content(), &config, "", false).into_string();
        assert!(html.contains("<title>Parroquia Santa María</title>"));
        assert!(html.contains("Santa María · Misas y celebraciones"));
    }

    #[test]
    fn remote_content_is_escaped() {
        let partial = PartialContentDocument::from_json(
            r#"{"hero": {"chip": "<script>alert('xss')</script>"}}"#,
        )
        .unwrap();
        let doc = merge(default_content(), partial);
        let html = render_page(&doc, &SiteConfig::default(), "", false).into_string();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn generate_writes_page_and_content_json() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("dist");
        let mut state = ContentState::new();
        state.settle_offline();

        let site = generate(&state, &SiteConfig::default(), &out).unwrap();

        let html = fs::read_to_string(&site.index).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("--accent-gold: #d4af37"));
        assert!(html.contains(".schedule-list"));
        assert!(!html.contains(r#"class="loading-indicator""#));

        let json = fs::read_to_string(&site.content_json).unwrap();
        let written: ContentDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(&written, default_content());
    }
}
