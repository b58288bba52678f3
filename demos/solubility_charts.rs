//! Example: Educational Charts
//!
//! Renders the three static charts that explain the simulation:
//!
//! - relative solubility of hydroxyapatite and fluorapatite against pH
//! - protection effectiveness of five coating materials
//! - chemical compatibility of the coating materials (radar chart)

use enamel_rs::output::visualization::{
    coating_materials, compatibility_profiles, plot_chemical_compatibility,
    plot_coating_comparison, plot_ph_solubility, solubility_curves,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Enamel Chemistry - Static Charts");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Solubility ======

    let curves = solubility_curves(6);
    println!("{:>6} {:>16} {:>16}", "pH", "Hydroxyapatite", "Fluorapatite");
    println!("{:-<40}", "");
    for i in 0..curves.ph.len() {
        println!(
            "{:>6.1} {:>16.3} {:>16.3}",
            curves.ph[i], curves.hydroxyapatite[i], curves.fluorapatite[i]
        );
    }

    // ====== Coating materials ======

    let materials = coating_materials();
    println!("\n{:<20} {:>6} {:>6} {:>6}", "Material", "Acid", "Dur.", "Remin.");
    println!("{:-<42}", "");
    for m in &materials {
        println!(
            "{:<20} {:>5}% {:>5}% {:>5}%",
            m.name, m.acid_resistance, m.durability, m.remineralization
        );
    }

    // ====== Plots ======

    let tmp_dir = std::env::temp_dir();
    let solubility = tmp_dir.join("ph_solubility.png");
    let comparison = tmp_dir.join("coating_comparison.png");
    let compatibility = tmp_dir.join("chemical_compatibility.svg");

    plot_ph_solubility(solubility.to_str().ok_or("non UTF-8 temp path")?, None)?;
    plot_coating_comparison(&materials, comparison.to_str().ok_or("non UTF-8 temp path")?, None)?;
    plot_chemical_compatibility(
        &compatibility_profiles(),
        compatibility.to_str().ok_or("non UTF-8 temp path")?,
        None,
    )?;

    println!("\nSaved:");
    println!("  {}", solubility.display());
    println!("  {}", comparison.display());
    println!("  {}", compatibility.display());

    Ok(())
}
