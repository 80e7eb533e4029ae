use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read as _};

use jirahook::config;
use jirahook::jiraevent::{text_at, CommentEventType, EVENT_TYPE_FIELD, WEBHOOK_EVENT_FIELD};
use tracing::{info, warn};

fn read_payload(source: Option<&str>) -> io::Result<Vec<u8>> {
    match source {
        None | Some("-") => {
            let mut raw = Vec::new();
            io::stdin().read_to_end(&mut raw)?;
            Ok(raw)
        }
        Some(path) => fs::read(path),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    jirahook::setup_log();

    let arg = env::args().nth(1).unwrap_or_else(|| {
        panic!(
            "usage: {} <config> [payload.json|-]",
            env::args().next().unwrap_or_default()
        )
    });
    let cfg = config::load(arg.as_ref())?;
    let transformer = cfg.transformer();

    let raw = read_payload(env::args().nth(2).as_deref())?;
    let payload: serde_json::Value = serde_json::from_slice(&raw)?;

    let event_type = text_at(&payload, EVENT_TYPE_FIELD);
    let event = CommentEventType::from_name(&event_type);
    if transformer.events().contains(&event) {
        info!(%event, "Received comment event");
    } else {
        warn!(
            %event_type,
            webhook_event = %text_at(&payload, WEBHOOK_EVENT_FIELD),
            "Not a comment event, the action label will be empty"
        );
    }

    let normalized = transformer.transform(payload)?;
    println!("{}", serde_json::to_string_pretty(&normalized)?);

    Ok(())
}
