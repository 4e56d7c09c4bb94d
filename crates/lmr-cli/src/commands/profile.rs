use lmr_core::error::LmrError;
use lmr_core::profile::builtin;
use lmr_core::profile::schema::{ExtractionProfile, FieldKind, PostProcess};
use std::path::Path;

pub fn show(file: Option<&Path>) -> Result<(), LmrError> {
    let profile = match file {
        Some(path) => lmr_core::profile::load_profile(path)?,
        None => builtin::load_preset("lmr")?,
    };
    describe(&profile);
    Ok(())
}

fn describe(profile: &ExtractionProfile) {
    println!("{} (version {})\n", profile.name, profile.version);
    if let Some(ref desc) = profile.description {
        println!("{}\n", desc);
    }

    println!("Report anchor: {}\n", profile.report_anchor);
    println!(
        "Identity: date = {:?}, rig = {:?}, well = {:?}\n",
        profile.identity.date, profile.identity.rig, profile.identity.well
    );

    println!("Fields ({}):\n", profile.fields.len());
    let max_name = profile
        .fields
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(20);
    for field in &profile.fields {
        let kind = match field.kind {
            FieldKind::Single => "single",
            FieldKind::Joined => "joined",
            FieldKind::Bounded => "bounded",
        };
        let post = match field.post {
            PostProcess::Trim => "",
            PostProcess::Collapse => " -> collapsed text",
            PostProcess::Integer => " -> integer",
            PostProcess::Decimal => " -> decimal",
        };
        println!("  {:<width$}  {:<8}{}", field.name, kind, post, width = max_name);
    }
    println!();

    if !profile.groups.is_empty() {
        println!("Repeated groups:\n");
        for group in &profile.groups {
            let scope = match &group.section {
                Some(section) => format!("within section {}", section.start),
                None => "whole report".to_string(),
            };
            println!("  {} (first {}, {})", group.name, group.cap, scope);
            for column in &group.columns {
                println!("    {}", column);
            }
        }
        println!();
    }

    println!("Timeline:");
    println!("  anchor      {}", profile.timeline.anchor);
    match &profile.timeline.structured {
        Some(_) => println!("  structured  yes (codes, depths and hours)"),
        None => println!("  structured  no (summary text only)"),
    }
    if let Some(ref stop) = profile.timeline.stop {
        println!("  stop        {}", stop);
    }
    println!();
}

pub fn validate(path: &Path) -> Result<(), LmrError> {
    let profile = lmr_core::profile::load_profile(path)?;
    println!(
        "Valid: {} (v{}) with {} field(s), {} group(s)",
        profile.name,
        profile.version,
        profile.fields.len(),
        profile.groups.len()
    );
    Ok(())
}

pub fn dump() -> Result<(), LmrError> {
    print!("{}", builtin::LMR_DEFAULT_TOML);
    Ok(())
}
