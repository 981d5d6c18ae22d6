use dugout_terminal::classify::{
    ClassificationPolicy, Direction, Thresholds, Tier, classify,
};

#[test]
fn higher_is_better_tiers() {
    let policy = ClassificationPolicy::default();
    assert_eq!(classify(&policy, "K%", "85"), Tier::Excellent);
    assert_eq!(classify(&policy, "K%", "80%"), Tier::Excellent);
    assert_eq!(classify(&policy, "K%", "65"), Tier::Good);
    assert_eq!(classify(&policy, "K%", "60"), Tier::Good);
    assert_eq!(classify(&policy, "K%", "10"), Tier::Poor);
}

#[test]
fn lower_is_better_tiers() {
    let policy = ClassificationPolicy::default();
    assert_eq!(classify(&policy, "ERA", "1.0"), Tier::Excellent);
    assert_eq!(classify(&policy, "ERA", "2.0"), Tier::Excellent);
    assert_eq!(classify(&policy, "ERA", "3.0"), Tier::Good);
    assert_eq!(classify(&policy, "ERA", "4.0"), Tier::Good);
    assert_eq!(classify(&policy, "ERA", "9.0"), Tier::Poor);
}

#[test]
fn banded_percentage_tiers() {
    let policy = ClassificationPolicy::default();
    assert_eq!(classify(&policy, "S%", "70%"), Tier::Excellent);
    assert_eq!(classify(&policy, "S%", "90%"), Tier::Excellent);
    assert_eq!(classify(&policy, "S%", "50%"), Tier::Good);
    assert_eq!(classify(&policy, "S%", "69.9%"), Tier::Good);
    assert_eq!(classify(&policy, "S%", "92%"), Tier::Good);
    assert_eq!(classify(&policy, "S%", "95%"), Tier::Good);
    assert_eq!(classify(&policy, "S%", "96%"), Tier::Poor);
    assert_eq!(classify(&policy, "S%", "49%"), Tier::Poor);
}

#[test]
fn unparseable_values_are_non_numeric_for_any_column() {
    let policy = ClassificationPolicy::default();
    for label in ["K%", "ERA", "S%", "Notes"] {
        assert_eq!(classify(&policy, label, "N/A"), Tier::NonNumeric);
        assert_eq!(classify(&policy, label, ""), Tier::NonNumeric);
    }
}

#[test]
fn unlisted_columns_are_neutral() {
    let policy = ClassificationPolicy::default();
    assert_eq!(classify(&policy, "BF", "168"), Tier::Neutral);
    assert_eq!(classify(&policy, "era", "1.0"), Tier::Neutral);
    assert_eq!(policy.direction("WHIP"), Some(Direction::LowerIsBetter));
    assert_eq!(policy.direction("FB CSW"), Some(Direction::BandedPercentage));
    assert_eq!(policy.direction("BF"), None);
}

#[test]
fn classification_is_pure() {
    let policy = ClassificationPolicy::default();
    let first = classify(&policy, "WHIP", "1.27");
    for _ in 0..3 {
        assert_eq!(classify(&policy, "WHIP", "1.27"), first);
    }
}

#[test]
fn custom_policy_uses_its_own_table() {
    let policy = ClassificationPolicy::new(&["OBP"], &[], &[], Thresholds::default());
    assert_eq!(classify(&policy, "OBP", "85"), Tier::Excellent);
    assert_eq!(classify(&policy, "ERA", "1.0"), Tier::Neutral);
}
