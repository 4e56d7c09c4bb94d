use lmr_core::error::LmrError;
use lmr_core::model::BatchOutput;

pub fn print(batch: &BatchOutput) -> Result<(), LmrError> {
    let json = serde_json::to_string_pretty(batch)?;
    println!("{json}");
    Ok(())
}
