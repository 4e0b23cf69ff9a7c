use super::*;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

fn pebbles_plan() -> WarpPlan {
    WarpPlan {
        name: "Amber Pebbles".to_string(),
        width: 70.0,
        pattern_ends: 108,
        extra_ends: 4,
        yarn: vec![Yarn {
            material: "cotton".to_string(),
            colour: "amber".to_string(),
            m_per_kg: 10_000.0,
            price_per_kg: 500.0,
            ..Yarn::default()
        }],
        products: vec![Product {
            name: "Wrap".to_string(),
            length: 200.0,
            hems: 10.0,
            fringes: 20.0,
            yarn: vec![Yarn {
                material: "cotton".to_string(),
                colour: "onyx".to_string(),
                m_per_kg: 10_000.0,
                price_per_kg: 500.0,
                ..Yarn::default()
            }],
            ..Product::default()
        }],
        ..WarpPlan::default()
    }
}

#[test]
fn test_warp_length_from_products() {
    let plan = pebbles_plan();
    let est = estimate(&plan).unwrap();

    // Overheads 0 + 20 + 15 + 50, plus (200 + 10) * 1.10 + 20 fringes.
    assert_close(est.warp_length, 85.0 + 231.0 + 20.0);
}

#[test]
fn test_explicit_length_wins() {
    let plan = WarpPlan {
        length: 600.0,
        ..pebbles_plan()
    };
    let est = estimate(&plan).unwrap();
    assert_close(est.warp_length, 600.0);
}

#[test]
fn test_ends_round_to_whole_pattern_repeats() {
    let plan = pebbles_plan();
    let est = estimate(&plan).unwrap();

    // 70 cm * 1.15 shrinkage * 10 ends/cm = 805 raw ends; 805 / 108 rounds
    // to 7 repeats = 756 ends, plus 4 extra.
    assert_eq!(est.n_pattern_repeats, 7);
    assert_eq!(est.n_ends, 760);
    assert_close(est.adjusted_weaving_width, 75.6);
    assert_close(est.adjusted_final_width, 75.6 / 1.15);
}

#[test]
fn test_zero_pattern_ends_skips_rounding() {
    let plan = WarpPlan {
        pattern_ends: 0,
        ..pebbles_plan()
    };
    let est = estimate(&plan).unwrap();
    assert_eq!(est.n_pattern_repeats, 0);
    assert_eq!(est.n_ends, 805 + 4);
}

#[test]
fn test_warp_yarn_consumption_and_cost() {
    let plan = pebbles_plan();
    let est = estimate(&plan).unwrap();

    let warp = &est.yarn_usage[0];
    assert_eq!(warp.used_for, "warp");
    // 760 ends over 3.36 m of warp.
    assert_close(warp.meters, 760.0 * 3.36);
    // 5 % m/kg margin on top.
    assert_close(warp.kilograms, 760.0 * 3.36 / 10_000.0 * 1.05);
    assert_close(warp.cost, warp.kilograms * 500.0);
}

#[test]
fn test_weft_yarn_follows_the_product() {
    let plan = pebbles_plan();
    let est = estimate(&plan).unwrap();

    let weft = &est.yarn_usage[1];
    assert_eq!(weft.used_for, "Wrap");
    // 10 picks/cm over 231 woven cm, each 0.756 m wide in the reed.
    assert_close(weft.meters, 10.0 * 231.0 * 0.756);
    assert_close(est.total_cost, est.yarn_usage.iter().map(|u| u.cost).sum());
}

#[test]
fn test_missing_m_per_kg_is_an_error() {
    let mut plan = pebbles_plan();
    plan.yarn[0].m_per_kg = 0.0;
    assert!(matches!(
        estimate(&plan),
        Err(ProjectError::UnknownYarnWeight(_))
    ));
}

#[test]
fn test_empty_plan_is_an_error() {
    let plan = WarpPlan::default();
    assert!(matches!(estimate(&plan), Err(ProjectError::NothingToWeave)));
}

#[test]
fn test_yaml_defaults_fill_absent_fields() {
    let yaml = r#"
name: Misty Morning
width: 72
pattern_ends: 96
shrinkage:
  width: 12
yarn:
  - material: merino
    m_per_kg: 14000
    price_per_kg: 900
products:
  - name: Wrap
    length: 210
    yarn:
      - material: merino
        m_per_kg: 14000
        price_per_kg: 900
"#;
    let plan: WarpPlan = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(plan.name, "Misty Morning");
    assert_close(plan.shrinkage.width, 12.0);
    // Absent length shrinkage keeps its default.
    assert_close(plan.shrinkage.length, 10.0);
    assert_close(plan.efsingar, 50.0);
    assert_eq!(plan.yarn[0].currency, "SEK");
    assert_close(plan.yarn[0].m_per_kg_error, 5.0);
    assert_eq!(plan.products[0].name, "Wrap");
    assert_close(plan.products[0].fringe_shortening, 20.0);

    assert!(estimate(&plan).is_ok());
}

#[test]
fn test_report_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.yml");

    let plan = pebbles_plan();
    let report = ProjectReport {
        output: estimate(&plan).unwrap(),
        input: plan,
    };
    report.dump(&path).unwrap();

    let loaded = ProjectReport::load(&path).unwrap();
    assert_eq!(loaded, report);
}
