use oh_core::DrawMode;
use tracing::info;

use super::DrawOptions;

pub async fn run(opts: &DrawOptions, mode: DrawMode, json: bool) -> Result<(), String> {
    let coordinator = super::build_coordinator(opts)?;

    let card = super::draw_card(&coordinator, mode, opts.config.ritual_delay)
        .await
        .ok_or("a draw is already in progress")?;
    info!(%mode, source = %card.source(), id = %card.id(), "card drawn");

    if json {
        let out = serde_json::to_string_pretty(&card).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        println!("{}", super::render_card(&card));
    }

    Ok(())
}
