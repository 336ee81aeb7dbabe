// rowguard/src/commands/profiles.rs
//
// USE CASE: List the builtin profiles.

use comfy_table::{Table, presets::UTF8_FULL};

use rowguard_core::domain::profile::{RepairMode, builtin};

pub fn execute() -> miette::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Repair mode", "Rules", "Description"]);

    for profile in builtin::all() {
        let mode = match profile.repair_mode {
            RepairMode::Safe => "safe",
            RepairMode::Aggressive => "aggressive",
        };
        table.add_row(vec![
            profile.name.clone(),
            mode.to_string(),
            profile.relation_rules.len().to_string(),
            profile.description.clone(),
        ]);
    }

    println!("📋 Builtin profiles:");
    println!("{table}");
    Ok(())
}
