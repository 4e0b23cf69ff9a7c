use serde::{Deserialize, Serialize};

/// A warp and the products woven on it. Lengths and widths are in cm,
/// shrinkage and error figures in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpPlan {
    pub name: String,
    pub shrinkage: Shrinkage,
    /// Extra ends added to the total but not to the width (e.g. selvedge
    /// doubling).
    pub extra_ends: u32,
    /// Warp reserved for sampling, cm.
    pub sampling: f64,
    /// Warp used to even out the shed after tying on, cm.
    pub evening_weaving: f64,
    /// Warp consumed by tying on, cm.
    pub tying: f64,
    /// Loom waste (efsingar), cm.
    pub efsingar: f64,
    /// Ends per cm.
    pub density: f64,
    /// Explicit total warp length, cm; 0 means "derive from the products".
    pub length: f64,
    /// Desired finished width, cm.
    pub width: f64,
    /// Ends in one pattern repeat; 0 disables repeat rounding.
    pub pattern_ends: u32,
    pub yarn: Vec<Yarn>,
    pub products: Vec<Product>,
}

impl Default for WarpPlan {
    fn default() -> Self {
        Self {
            name: String::new(),
            shrinkage: Shrinkage::default(),
            extra_ends: 0,
            sampling: 0.0,
            evening_weaving: 20.0,
            tying: 15.0,
            efsingar: 50.0,
            density: 10.0,
            length: 0.0,
            width: 0.0,
            pattern_ends: 0,
            yarn: Vec::new(),
            products: Vec::new(),
        }
    }
}

/// Width/length shrinkage from loom tension and wet finishing, percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shrinkage {
    pub width: f64,
    pub length: f64,
}

impl Default for Shrinkage {
    fn default() -> Self {
        Self {
            width: 15.0,
            length: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Yarn {
    pub material: String,
    pub thickness: String,
    pub colour: String,
    pub m_per_kg: f64,
    /// Safety margin on the m/kg figure, percent.
    pub m_per_kg_error: f64,
    pub price_per_kg: f64,
    pub currency: String,
    /// Multiplier into the reporting currency.
    pub currency_conversion: f64,
    pub url: String,
    /// Share of the ends (or picks) using this yarn.
    pub fraction: f64,
}

impl Default for Yarn {
    fn default() -> Self {
        Self {
            material: "unknown".to_string(),
            thickness: "unknown".to_string(),
            colour: "unknown".to_string(),
            m_per_kg: 0.0,
            m_per_kg_error: 5.0,
            price_per_kg: 0.0,
            currency: "SEK".to_string(),
            currency_conversion: 1.0,
            url: String::new(),
            fraction: 1.0,
        }
    }
}

/// One product woven on the warp, in weaving order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub ordinal: u32,
    pub name: String,
    /// Finished length, cm.
    pub length: f64,
    pub hems: f64,
    pub fringes: f64,
    /// Picks per cm.
    pub density: f64,
    pub yarn: Vec<Yarn>,
    /// How much the fringes shorten from twisting or braiding, percent.
    pub fringe_shortening: f64,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            ordinal: 0,
            name: "Unnamed".to_string(),
            length: 0.0,
            hems: 0.0,
            fringes: 0.0,
            density: 10.0,
            yarn: Vec::new(),
            fringe_shortening: 20.0,
        }
    }
}

/// Everything worth keeping from a planning run: the input plan and the
/// derived numbers, dumpable to YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub input: WarpPlan,
    pub output: super::ProjectEstimate,
}
