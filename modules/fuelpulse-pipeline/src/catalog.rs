//! Static product knowledge base.
//!
//! Maps keyword and context evidence to the direct-sales fuel catalog.
//! `min_confidence` is the per-product review threshold surfaced to the
//! admin side; inference applies its own inclusion floor.

use fuelpulse_common::ProductRule;

pub const DEFAULT_CATALOG: &[ProductRule] = &[
    ProductRule {
        code: "FO",
        name: "Furnace Oil",
        keywords: &["furnace oil", "fuel oil", "bunker fuel", "heavy oil", "fo 180", "fo 380"],
        contexts: &["boiler", "heating", "power plant", "thermal", "kiln", "furnace"],
        min_confidence: 0.7,
    },
    ProductRule {
        code: "LSHS",
        name: "Low Sulphur Heavy Stock",
        keywords: &["lshs", "low sulphur heavy stock", "low sulfur heavy stock"],
        contexts: &["fertilizer", "power generation", "low emission", "sulfur limit"],
        min_confidence: 0.8,
    },
    ProductRule {
        code: "HSD",
        name: "High Speed Diesel",
        keywords: &["hsd", "high speed diesel", "diesel", "gas oil"],
        contexts: &["transport", "genset", "generator", "backup power", "mining", "fleet"],
        min_confidence: 0.6,
    },
    ProductRule {
        code: "LDO",
        name: "Light Diesel Oil",
        keywords: &["ldo", "light diesel oil"],
        contexts: &["pump", "lift irrigation", "small boiler", "diesel engine"],
        min_confidence: 0.75,
    },
    ProductRule {
        code: "BITUMEN",
        name: "Bitumen",
        keywords: &["bitumen", "asphalt", "road tar", "vg 30", "vg 10", "vg 40"],
        contexts: &["road construction", "highway", "paving", "infrastructure", "waterproofing"],
        min_confidence: 0.85,
    },
    ProductRule {
        code: "HEXANE",
        name: "Hexane",
        keywords: &["hexane", "food grade hexane"],
        contexts: &["solvent extraction", "vegetable oil", "pharma", "polymer"],
        min_confidence: 0.8,
    },
    ProductRule {
        code: "MTO",
        name: "Mineral Turpentine Oil",
        keywords: &["mto", "mineral turpentine oil", "white spirit"],
        contexts: &["paint", "varnish", "dry cleaning", "degreasing"],
        min_confidence: 0.75,
    },
    ProductRule {
        code: "JBO",
        name: "Jute Batching Oil",
        keywords: &["jbo", "jute batching oil"],
        contexts: &["jute", "textile mill", "fiber processing"],
        min_confidence: 0.9,
    },
];
