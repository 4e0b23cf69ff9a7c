use serde::{Deserialize, Serialize};

use super::{ProjectError, WarpPlan, Yarn};

pub fn cm_to_m(cm: f64) -> f64 {
    cm / 100.0
}

/// Derived numbers for a warp plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEstimate {
    /// Total warp length, cm.
    pub warp_length: f64,
    pub n_ends: u32,
    pub n_pattern_repeats: u32,
    /// Width in the reed after repeat rounding, cm.
    pub adjusted_weaving_width: f64,
    /// Expected finished width after shrinkage, cm.
    pub adjusted_final_width: f64,
    pub yarn_usage: Vec<YarnUsage>,
    /// Sum of the per-yarn costs in the reporting currency.
    pub total_cost: f64,
}

/// Consumption and cost for one yarn line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YarnUsage {
    /// "warp" or the product name.
    pub used_for: String,
    pub material: String,
    pub colour: String,
    pub meters: f64,
    /// Weight including the m/kg safety margin, kg.
    pub kilograms: f64,
    pub cost: f64,
    pub currency: String,
}

/// Work a plan through to its estimate. Pure: the plan is not mutated and
/// nothing is cached.
pub fn estimate(plan: &WarpPlan) -> Result<ProjectEstimate, ProjectError> {
    let warp_length = warp_length(plan)?;
    let (n_ends, n_pattern_repeats, adjusted_weaving_width) = ends(plan);
    let adjusted_final_width = adjusted_weaving_width / width_shrinkage(plan);

    let mut yarn_usage = Vec::new();

    // Warp yarn: every end runs the full warp length.
    let warp_meters = n_ends as f64 * cm_to_m(warp_length);
    for yarn in &plan.yarn {
        yarn_usage.push(usage_for("warp", yarn, warp_meters * yarn.fraction)?);
    }

    // Weft yarn per product: picks over the woven length, each as wide as
    // the warp in the reed.
    for product in &plan.products {
        let woven_length = (product.length + product.hems) * length_shrinkage(plan);
        let picks = product.density * woven_length;
        let weft_meters = picks * cm_to_m(adjusted_weaving_width);
        for yarn in &product.yarn {
            yarn_usage.push(usage_for(&product.name, yarn, weft_meters * yarn.fraction)?);
        }
    }

    let total_cost = yarn_usage.iter().map(|u| u.cost).sum();

    Ok(ProjectEstimate {
        warp_length,
        n_ends,
        n_pattern_repeats,
        adjusted_weaving_width,
        adjusted_final_width,
        yarn_usage,
        total_cost,
    })
}

/// Explicit length wins; otherwise the products plus the fixed overheads
/// (sampling, evening out, tying on, loom waste) decide.
fn warp_length(plan: &WarpPlan) -> Result<f64, ProjectError> {
    if plan.length > 0.0 {
        return Ok(plan.length);
    }
    if plan.products.is_empty() {
        return Err(ProjectError::NothingToWeave);
    }

    let mut total = plan.sampling + plan.evening_weaving + plan.tying + plan.efsingar;
    let shrinkage = length_shrinkage(plan);
    for product in &plan.products {
        total += (product.length + product.hems) * shrinkage + product.fringes;
    }
    Ok(total)
}

/// End count, pattern repeats, and the width in the reed. With
/// `pattern_ends == 0` the raw count is used and repeats are reported as 0.
fn ends(plan: &WarpPlan) -> (u32, u32, f64) {
    let weaving_width = plan.width * width_shrinkage(plan);
    let raw_ends = weaving_width * plan.density;

    let (whole_ends, repeats) = if plan.pattern_ends > 0 {
        let repeats = (raw_ends / plan.pattern_ends as f64).round() as u32;
        (repeats * plan.pattern_ends, repeats)
    } else {
        (raw_ends.round() as u32, 0)
    };

    let adjusted_weaving_width = if plan.density > 0.0 {
        whole_ends as f64 / plan.density
    } else {
        0.0
    };

    (whole_ends + plan.extra_ends, repeats, adjusted_weaving_width)
}

fn usage_for(used_for: &str, yarn: &Yarn, meters: f64) -> Result<YarnUsage, ProjectError> {
    if yarn.m_per_kg <= 0.0 {
        return Err(ProjectError::UnknownYarnWeight(format!(
            "{} {} {}",
            yarn.material, yarn.thickness, yarn.colour
        )));
    }
    let kilograms = meters / yarn.m_per_kg * (1.0 + yarn.m_per_kg_error / 100.0);
    let cost = kilograms * yarn.price_per_kg * yarn.currency_conversion;
    Ok(YarnUsage {
        used_for: used_for.to_string(),
        material: yarn.material.clone(),
        colour: yarn.colour.clone(),
        meters,
        kilograms,
        cost,
        currency: yarn.currency.clone(),
    })
}

fn width_shrinkage(plan: &WarpPlan) -> f64 {
    1.0 + plan.shrinkage.width / 100.0
}

fn length_shrinkage(plan: &WarpPlan) -> f64 {
    1.0 + plan.shrinkage.length / 100.0
}
