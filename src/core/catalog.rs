// EventSheet - core/catalog.rs
//
// Built-in event definitions. The table is compiled in; callers receive it
// as an `EventCatalog` value and pass it explicitly to the classifier and
// the report builder.

use crate::core::model::{EventCatalog, EventDefinition};

/// (event name, short worksheet label). The match phrase equals the name.
const BUILTIN_EVENTS: &[(&str, Option<&str>)] = &[
    ("New user registered", None),
    ("Administrator privileges granted", Some("Admin privileges")),
    ("Service started", None),
    ("Service stopped", None),
    ("System rebooted", None),
    ("System reboot initiated", Some("Reboot initiated")),
    ("Email sent", None),
    ("Email received", None),
    ("Database connection established", Some("DB connected")),
    ("Database connection lost", Some("DB disconnected")),
    ("Archive created", None),
    ("Notification sent", None),
    ("Notification received", None),
    ("File downloaded", None),
    ("File uploaded", None),
];

impl EventCatalog {
    /// The fixed set of events this tool reports on.
    pub fn builtin() -> Self {
        let definitions = BUILTIN_EVENTS
            .iter()
            .map(|(name, label)| {
                let def = EventDefinition::new(*name);
                match label {
                    Some(l) => def.with_sheet_label(*l),
                    None => def,
                }
            })
            .collect();
        EventCatalog::new(definitions)
    }
}
