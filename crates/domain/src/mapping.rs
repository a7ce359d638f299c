//! Record mapper: one raw character record to one actor payload.

use crate::common::none_if_empty;
use crate::entities::{CharacterContent, CharacterRecord};
use crate::ids::FolderId;
use crate::images::ResolvedImages;
use crate::payload::{
    ActorAttributes, ActorDetails, ActorPayload, ActorSystem, Biography, ImportFlags,
    ImportProvenance, Movement, TextureSrc, TokenPatch, DEFAULT_ACTOR_TYPE,
};
use crate::value_objects::UNNAMED_CHARACTER;

/// Constants stamped onto every mapped payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDefaults {
    pub actor_type: String,
    pub placeholder_name: String,
    pub source_label: String,
    pub movement: Movement,
}

impl Default for MappingDefaults {
    fn default() -> Self {
        Self {
            actor_type: DEFAULT_ACTOR_TYPE.to_string(),
            placeholder_name: UNNAMED_CHARACTER.to_string(),
            source_label: "characters.json".to_string(),
            movement: Movement::default(),
        }
    }
}

/// Render a biography as HTML-ish text.
///
/// The trimmed excerpt comes first; each section follows as an optional bold
/// title line and its text, separated by blank lines. The result is trimmed.
pub fn build_biography(content: Option<&CharacterContent>) -> String {
    let Some(content) = content else {
        return String::new();
    };

    let mut parts: Vec<String> = Vec::with_capacity(content.sections.len() + 1);
    if let Some(excerpt) = content.excerpt.as_deref().and_then(none_if_empty) {
        parts.push(excerpt.trim().to_string());
    }
    for section in &content.sections {
        let heading = match section.title.as_deref().and_then(none_if_empty) {
            Some(title) => format!("\n\n<strong>{title}</strong>\n"),
            None => "\n\n".to_string(),
        };
        parts.push(heading + section.text.as_deref().unwrap_or_default());
    }
    parts.join("\n").trim().to_string()
}

/// Map one record into a payload for `folder`, using already-resolved images.
pub fn map_record(
    record: &CharacterRecord,
    folder: FolderId,
    images: &ResolvedImages,
    defaults: &MappingDefaults,
) -> ActorPayload {
    ActorPayload {
        name: record.display_name(&defaults.placeholder_name),
        actor_type: defaults.actor_type.clone(),
        folder,
        img: images.portrait.clone(),
        system: ActorSystem {
            details: ActorDetails {
                race: record.race().to_string(),
                biography: Biography {
                    value: build_biography(record.content()),
                },
            },
            attributes: ActorAttributes {
                movement: defaults.movement.clone(),
            },
        },
        prototype_token: images.token.as_ref().map(|src| TokenPatch {
            texture: TextureSrc { src: src.clone() },
        }),
        flags: ImportFlags {
            import: ImportProvenance {
                source: defaults.source_label.clone(),
                raw: record.raw().clone(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ContentSection;
    use serde_json::json;

    fn content(excerpt: Option<&str>, sections: &[(Option<&str>, Option<&str>)]) -> CharacterContent {
        CharacterContent {
            excerpt: excerpt.map(str::to_string),
            sections: sections
                .iter()
                .map(|(title, text)| ContentSection {
                    title: title.map(str::to_string),
                    text: text.map(str::to_string),
                })
                .collect(),
        }
    }

    #[test]
    fn test_biography_empty_without_content() {
        assert_eq!(build_biography(None), "");
        assert_eq!(build_biography(Some(&content(None, &[]))), "");
    }

    #[test]
    fn test_biography_excerpt_then_sections() {
        let bio = build_biography(Some(&content(
            Some("  A wandering ranger.  "),
            &[(Some("Past"), Some("Born in the north.")), (None, Some("Rumors abound."))],
        )));
        assert_eq!(
            bio,
            "A wandering ranger.\n\n\n<strong>Past</strong>\nBorn in the north.\n\n\nRumors abound."
        );
    }

    #[test]
    fn test_biography_without_excerpt_is_trimmed() {
        let bio = build_biography(Some(&content(None, &[(Some("Past"), None)])));
        assert_eq!(bio, "<strong>Past</strong>");
    }

    #[test]
    fn test_map_record_with_images() {
        let record = CharacterRecord::from_value(json!({"name": "Mira", "race": " Elf "}));
        let folder = FolderId::new();
        let images = ResolvedImages {
            portrait: Some("mira.png".to_string()),
            token: Some("mira token.png".to_string()),
        };

        let payload = map_record(&record, folder, &images, &MappingDefaults::default());

        assert_eq!(payload.name.as_str(), "Mira");
        assert_eq!(payload.actor_type, "npc");
        assert_eq!(payload.folder, folder);
        assert_eq!(payload.img.as_deref(), Some("mira.png"));
        assert_eq!(payload.token_src(), Some("mira token.png"));
        assert_eq!(payload.system.details.race, "Elf");
        assert_eq!(payload.system.attributes.movement, Movement::default());
        assert_eq!(payload.flags.import.source, "characters.json");
        assert_eq!(payload.flags.import.raw, json!({"name": "Mira", "race": " Elf "}));
    }

    #[test]
    fn test_map_record_without_images_and_name() {
        let record = CharacterRecord::from_value(json!({"name": "   "}));
        let payload = map_record(
            &record,
            FolderId::new(),
            &ResolvedImages::none(),
            &MappingDefaults::default(),
        );

        assert_eq!(payload.name.as_str(), UNNAMED_CHARACTER);
        assert_eq!(payload.img, None);
        assert_eq!(payload.prototype_token, None);
        assert_eq!(payload.system.details.race, "");
        assert_eq!(payload.system.details.biography.value, "");
    }

    #[test]
    fn test_map_record_is_deterministic() {
        let record = CharacterRecord::named("Mira");
        let folder = FolderId::new();
        let defaults = MappingDefaults::default();
        let a = map_record(&record, folder, &ResolvedImages::none(), &defaults);
        let b = map_record(&record, folder, &ResolvedImages::none(), &defaults);
        assert_eq!(a, b);
    }
}
