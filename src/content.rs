//! Page content: the full document the renderer consumes, the sparse document
//! the content endpoint sends, and the merge between the two.
//!
//! ## Wire Format
//!
//! The endpoint returns JSON with camelCase keys. Any key, at any depth, may be
//! missing:
//!
//! ```json
//! {
//!   "hero": { "chip": "Misas · Bautizos" },
//!   "costs": [{ "label": "Bautizo", "price": "$900 MXN" }],
//!   "community": { "sectionTitle": "Nuestra parroquia" }
//! }
//! ```
//!
//! ## Merge Rules
//!
//! [`merge`] lays a [`PartialContentDocument`] over the bundled default:
//!
//! | Field | Rule |
//! |-------|------|
//! | `hero`, `contact` | each sub-field overrides independently |
//! | `community.sectionTitle`, `community.sectionSubtitle` | each overrides independently |
//! | `schedules`, `costs`, `prayers`, `community.photos` | a non-empty remote list replaces the default list wholesale |
//!
//! Lists are never merged element by element and schedules are not
//! de-duplicated by `id`. An empty remote list counts as absent.
//!
//! ## Tolerant Parsing
//!
//! Every field of the partial document deserializes leniently: `null` or a
//! value of the wrong shape is treated as if the key were absent, so one bad
//! field never discards the rest of an otherwise usable document. Unknown keys
//! are ignored.

use serde::de::{DeserializeOwned, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

/// The complete content of the page. Every field is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub hero: Hero,
    pub schedules: Vec<Schedule>,
    pub costs: Vec<Cost>,
    pub prayers: Vec<Prayer>,
    pub community: Community,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    /// Plain lead-in of the main title ("Comunidad de").
    pub title_prefix: String,
    /// Emphasized tail of the main title ("San José").
    pub title_highlight: String,
    /// Short tagline shown in a pill under the title.
    pub chip: String,
    pub subtitle: String,
    /// Opaque URL; never validated or fetched by the generator.
    pub image_url: String,
}

/// A row in the mass schedule. `id` is a stable key, not a display value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub label: String,
    pub hours: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A sacrament and its suggested offering. `price` is display text, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cost {
    pub label: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prayer {
    pub title: String,
    pub description: String,
    pub schedule: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub section_title: String,
    pub section_subtitle: String,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub title: String,
    pub text: String,
    pub img_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub title: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub office_hours: String,
    pub email: String,
}

// =============================================================================
// Partial document (endpoint payload)
// =============================================================================

/// Sparse content sent by the endpoint. Absent and unusable fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialContentDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub hero: Option<PartialHero>,
    #[serde(default, deserialize_with = "lenient")]
    pub schedules: Option<Vec<Schedule>>,
    #[serde(default, deserialize_with = "lenient")]
    pub costs: Option<Vec<Cost>>,
    #[serde(default, deserialize_with = "lenient")]
    pub prayers: Option<Vec<Prayer>>,
    #[serde(default, deserialize_with = "lenient")]
    pub community: Option<PartialCommunity>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact: Option<PartialContact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialHero {
    #[serde(default, deserialize_with = "lenient")]
    pub title_prefix: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title_highlight: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub chip: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCommunity {
    #[serde(default, deserialize_with = "lenient")]
    pub section_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub section_subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub photos: Option<Vec<Photo>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialContact {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub office_hours: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
}

impl PartialContentDocument {
    /// Parse an endpoint body. Fails only when the body is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(serde::de::Error::invalid_type(
                unexpected(&value),
                &"a JSON object",
            ));
        }
        serde_json::from_value(value)
    }
}

fn unexpected(value: &serde_json::Value) -> Unexpected<'_> {
    match value {
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(b) => Unexpected::Bool(*b),
        serde_json::Value::Number(_) => Unexpected::Other("number"),
        serde_json::Value::String(s) => Unexpected::Str(s),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Object(_) => Unexpected::Map,
    }
}

/// Deserialize through `serde_json::Value` so a mistyped field degrades to
/// `None` instead of failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            log::warn!("Ignoring malformed content field: {e}");
            Ok(None)
        }
    }
}

// =============================================================================
// Merge
// =============================================================================

/// Lay `partial` over `default` and return the effective document.
///
/// Pure: no I/O, no logging of its own. See the module docs for the rules.
pub fn merge(default: &ContentDocument, partial: PartialContentDocument) -> ContentDocument {
    let hero = partial.hero.unwrap_or_default();
    let community = partial.community.unwrap_or_default();
    let contact = partial.contact.unwrap_or_default();

    ContentDocument {
        hero: Hero {
            title_prefix: hero
                .title_prefix
                .unwrap_or_else(|| default.hero.title_prefix.clone()),
            title_highlight: hero
                .title_highlight
                .unwrap_or_else(|| default.hero.title_highlight.clone()),
            chip: hero.chip.unwrap_or_else(|| default.hero.chip.clone()),
            subtitle: hero.subtitle.unwrap_or_else(|| default.hero.subtitle.clone()),
            image_url: hero
                .image_url
                .unwrap_or_else(|| default.hero.image_url.clone()),
        },
        schedules: replace_list(partial.schedules, &default.schedules),
        costs: replace_list(partial.costs, &default.costs),
        prayers: replace_list(partial.prayers, &default.prayers),
        community: Community {
            section_title: community
                .section_title
                .unwrap_or_else(|| default.community.section_title.clone()),
            section_subtitle: community
                .section_subtitle
                .unwrap_or_else(|| default.community.section_subtitle.clone()),
            photos: replace_list(community.photos, &default.community.photos),
        },
        contact: Contact {
            title: contact.title.unwrap_or_else(|| default.contact.title.clone()),
            description: contact
                .description
                .unwrap_or_else(|| default.contact.description.clone()),
            address: contact
                .address
                .unwrap_or_else(|| default.contact.address.clone()),
            phone: contact.phone.unwrap_or_else(|| default.contact.phone.clone()),
            office_hours: contact
                .office_hours
                .unwrap_or_else(|| default.contact.office_hours.clone()),
            email: contact.email.unwrap_or_else(|| default.contact.email.clone()),
        },
    }
}

/// Whole-list replacement: a non-empty remote list wins, anything else keeps the default.
fn replace_list<T: Clone>(remote: Option<Vec<T>>, default: &[T]) -> Vec<T> {
    match remote {
        Some(items) if !items.is_empty() => items,
        _ => default.to_vec(),
    }
}

// =============================================================================
// Bundled default
// =============================================================================

static DEFAULT_CONTENT: LazyLock<ContentDocument> = LazyLock::new(build_default_content);

/// The bundled default document. Immutable for the life of the process.
pub fn default_content() -> &'static ContentDocument {
    &DEFAULT_CONTENT
}

impl Default for ContentDocument {
    fn default() -> Self {
        default_content().clone()
    }
}

fn build_default_content() -> ContentDocument {
    ContentDocument {
        hero: Hero {
            title_prefix: "Comunidad de".into(),
            title_highlight: "San José".into(),
            chip: "Misas · Sacramentos · Comunidad".into(),
            subtitle: "Un espacio para la oración diaria, la Eucaristía y las celebraciones \
                       más importantes de tu vida: bautizos, bodas, XV años y misas especiales."
                .into(),
            image_url: "https://images.pexels.com/photos/29843273/pexels-photo-29843273.jpeg\
                        ?auto=compress&cs=tinysrgb&w=1200"
                .into(),
        },
        schedules: vec![
            schedule("weekday", "Lunes a viernes", "07:00 · 19:00", "Templo principal"),
            schedule("saturday", "Sábado", "07:00 · 17:00", "Misa de jóvenes"),
            schedule(
                "sunday",
                "Domingo",
                "07:00 · 09:00 · 12:00 · 19:00",
                "Aurora, niños, misa familiar y vespertina",
            ),
        ],
        costs: vec![
            cost("Bautizo", "$800 MXN"),
            cost("Boda religiosa", "$3,000 MXN"),
            cost("XV años", "$2,500 MXN"),
            cost("Misa de difunto", "$600 MXN"),
        ],
        prayers: vec![
            Prayer {
                title: "Santo Rosario".into(),
                description: "Rezo comunitario del rosario antes o después de misa en días \
                              señalados."
                    .into(),
                schedule: "Ejemplo: Lunes y jueves · 18:30 h".into(),
            },
            Prayer {
                title: "Adoración al Santísimo".into(),
                description: "Tiempo de silencio, canto y adoración frente al Santísimo \
                              Sacramento."
                    .into(),
                schedule: "Ejemplo: Primer viernes de mes · 19:30 h".into(),
            },
            Prayer {
                title: "Confesiones".into(),
                description: "Sacerdote disponible para confesión y acompañamiento espiritual."
                    .into(),
                schedule: "Ejemplo: Media hora antes de cada misa".into(),
            },
        ],
        community: Community {
            section_title: "Vida parroquial".into(),
            section_subtitle: "Ejemplos de cómo podría verse tu parroquia: fachada, interior y \
                               detalles del altar. Luego sustituyes por fotos reales."
                .into(),
            photos: vec![
                Photo {
                    title: "Fachada del templo".into(),
                    text: "Vista exterior de la iglesia, punto de encuentro de la comunidad."
                        .into(),
                    img_url: "https://images.pexels.com/photos/3735410/pexels-photo-3735410.jpeg\
                              ?auto=compress&cs=tinysrgb&w=800"
                        .into(),
                },
                Photo {
                    title: "Interior y bancas".into(),
                    text: "Espacio de oración, luz suave, bancas y el presbiterio al fondo."
                        .into(),
                    img_url: "https://images.pexels.com/photos/532798/pexels-photo-532798.jpeg\
                              ?auto=compress&cs=tinysrgb&w=800"
                        .into(),
                },
                Photo {
                    title: "Altar y velas".into(),
                    text: "Detalles del altar, flores y veladoras encendidas por las intenciones."
                        .into(),
                    img_url: "https://images.pexels.com/photos/2081122/pexels-photo-2081122.jpeg\
                              ?auto=compress&cs=tinysrgb&w=800"
                        .into(),
                },
            ],
        },
        contact: Contact {
            title: "Ubicación y oficina parroquial".into(),
            description: "Reemplaza estos datos por la dirección real, teléfonos, horarios de \
                          oficina y medios de contacto."
                .into(),
            address: "Calle San José s/n, Col. Centro, Tu ciudad, Tu estado.".into(),
            phone: "(000) 000 00 00".into(),
            office_hours: "Lunes a viernes · 10:00 a 14:00 h".into(),
            email: "parroquia.sanjose@ejemplo.com".into(),
        },
    }
}

fn schedule(id: &str, label: &str, hours: &str, note: &str) -> Schedule {
    Schedule {
        id: id.into(),
        label: label.into(),
        hours: hours.into(),
        note: Some(note.into()),
    }
}

fn cost(label: &str, price: &str) -> Cost {
    Cost {
        label: label.into(),
        price: price.into(),
    }
}
