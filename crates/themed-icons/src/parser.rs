//! Mapping document parsing.
//!
//! A mapping document has a single root element whose direct children are
//! icon records:
//!
//! ```xml
//! <icons>
//!     <icon package="com.example.app" drawable="@drawable/themed_app" />
//!     <icon package="com.example.other" drawable="@drawable/themed_other" />
//! </icons>
//! ```
//!
//! Records missing either attribute, with an empty package, or whose
//! drawable does not resolve to a non-zero resource are skipped. Elements
//! with other names and anything nested below the root's children are
//! ignored. When a package appears more than once, the record that comes
//! later in document order wins.

use crate::bundle::Bundle;
use crate::config::ThemedIconConfig;
use crate::document::DocumentHandle;
use crate::error::Result;
use crate::logging::targets;
use crate::stream::{Element, ElementEvent};
use crate::types::{ThemeData, ThemeIconMap};

/// Parse an opened mapping document into an icon map.
///
/// Drawable references are resolved against `bundle`, which must be the
/// bundle the document was opened from.
pub fn parse_icon_map(
    bundle: &Bundle,
    document: &DocumentHandle,
    config: &ThemedIconConfig,
) -> Result<ThemeIconMap> {
    read_icon_map(bundle, document.elements(), config)
}

/// Build an icon map from any element event source.
///
/// The first error from `events` aborts the whole parse; no partial map is
/// returned.
pub fn read_icon_map<I>(bundle: &Bundle, events: I, config: &ThemedIconConfig) -> Result<ThemeIconMap>
where
    I: IntoIterator<Item = Result<ElementEvent>>,
{
    let mut map = ThemeIconMap::new();
    let mut events = events.into_iter();

    let root_depth = loop {
        match events.next().transpose()? {
            Some(ElementEvent::Start(root)) => break root.depth(),
            Some(ElementEvent::End { .. }) => continue,
            None => return Ok(map),
        }
    };

    for event in events {
        match event? {
            ElementEvent::End { depth, .. } if depth <= root_depth => break,
            ElementEvent::Start(element)
                if element.depth() == root_depth + 1 && element.name() == config.icon_tag =>
            {
                read_record(bundle, &element, config, &mut map);
            }
            _ => {}
        }
    }

    Ok(map)
}

fn read_record(bundle: &Bundle, element: &Element, config: &ThemedIconConfig, map: &mut ThemeIconMap) {
    let package = element
        .attribute(&config.package_attribute)
        .filter(|package| !package.is_empty());
    let icon = element
        .attribute(&config.drawable_attribute)
        .and_then(|value| bundle.resolve_reference(value));

    match (package, icon) {
        (Some(package), Some(icon)) => {
            if map.insert(package, ThemeData::new(bundle.clone(), icon)).is_some() {
                tracing::trace!(target: targets::PARSER, package, "later icon record replaces earlier one");
            }
        }
        _ => {
            tracing::trace!(
                target: targets::PARSER,
                package = package.unwrap_or_default(),
                "skipping incomplete icon record"
            );
        }
    }
}
