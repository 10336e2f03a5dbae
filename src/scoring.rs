//! Risk scoring: the one authoritative implementation.
//!
//! Pure functions only. The server endpoint, the local session mode and
//! the CLI all call `score`/`assess`, so client previews and server
//! results cannot drift apart.

use crate::models::{
    AssessmentDetails, BloodPressure, BloodPressureCategory, BmiCategory, InputEcho,
    PointsBreakdown, RiskAssessment, RiskBreakdown, RiskCategory, RiskInput,
};

const KG_PER_POUND: f64 = 0.453592;
const METERS_PER_INCH: f64 = 0.0254;

/// Each keyword found in the family history adds this many points.
const FAMILY_CONDITION_POINTS: u32 = 10;
const FAMILY_CONDITIONS: &[&str] = &["diabetes", "cancer", "alzheimers"];

/// Score a validated input.
pub fn score(input: &RiskInput) -> RiskBreakdown {
    let age_points = age_points(input.age);
    let (bmi_points, _) = bmi_band(bmi(input));
    let (bp_points, _) = blood_pressure_band(input.blood_pressure);
    let family_points = family_points(&input.family);

    let total = age_points + bmi_points + bp_points + family_points;

    RiskBreakdown {
        age_points,
        bmi_points,
        bp_points,
        family_points,
        total,
        category: category_for(total),
    }
}

/// Score plus the detail labels shown to the user before confirmation.
pub fn assess(input: &RiskInput) -> RiskAssessment {
    let breakdown = score(input);
    let bmi = bmi(input);
    let (_, bmi_category) = bmi_band(bmi);
    let (_, bp_category) = blood_pressure_band(input.blood_pressure);

    RiskAssessment {
        input: InputEcho::from(input),
        details: AssessmentDetails {
            bmi,
            bmi_category,
            blood_pressure_category: bp_category,
        },
        points: PointsBreakdown {
            age: breakdown.age_points,
            bmi: breakdown.bmi_points,
            blood_pressure: breakdown.bp_points,
            family: breakdown.family_points,
        },
        total: breakdown.total,
        category: breakdown.category,
    }
}

pub fn age_points(age: u32) -> u32 {
    match age {
        0..=29 => 0,
        30..=45 => 10,
        46..=60 => 20,
        _ => 30,
    }
}

/// BMI rounded to one decimal. Bands are applied to the rounded value.
pub fn bmi(input: &RiskInput) -> f64 {
    let kg = input.pounds * KG_PER_POUND;
    let meters = input.height_inches() * METERS_PER_INCH;
    let raw = kg / (meters * meters);
    (raw * 10.0).round() / 10.0
}

/// Underweight falls outside every scored band and contributes 0.
pub fn bmi_band(bmi: f64) -> (u32, BmiCategory) {
    if bmi < 18.5 {
        (0, BmiCategory::Underweight)
    } else if bmi < 25.0 {
        (0, BmiCategory::Normal)
    } else if bmi < 30.0 {
        (30, BmiCategory::Overweight)
    } else if bmi < 35.0 {
        (75, BmiCategory::Obese)
    } else {
        (100, BmiCategory::VeryObese)
    }
}

/// First matching band wins; the order below is the contract.
pub fn blood_pressure_band(bp: BloodPressure) -> (u32, BloodPressureCategory) {
    let BloodPressure {
        systolic: sys,
        diastolic: dia,
    } = bp;

    if sys < 120 && dia < 80 {
        (0, BloodPressureCategory::Normal)
    } else if (120..=129).contains(&sys) && dia < 80 {
        (15, BloodPressureCategory::Elevated)
    } else if (130..=138).contains(&sys) || (80..=89).contains(&dia) {
        (30, BloodPressureCategory::Stage1)
    } else if sys >= 140 || dia >= 90 {
        (75, BloodPressureCategory::Stage2)
    } else if sys >= 180 || dia > 120 {
        (100, BloodPressureCategory::Crisis)
    } else {
        (0, BloodPressureCategory::Unclassified)
    }
}

/// Case-insensitive keyword scan. Matches are cumulative.
pub fn family_points(family: &str) -> u32 {
    let haystack: String = family
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .flat_map(char::to_lowercase)
        .collect();

    let hits = FAMILY_CONDITIONS
        .iter()
        .filter(|keyword| haystack.contains(**keyword))
        .count() as u32;

    hits * FAMILY_CONDITION_POINTS
}

pub fn category_for(total: u32) -> RiskCategory {
    match total {
        0..=20 => RiskCategory::Best,
        21..=50 => RiskCategory::Standard,
        51..=75 => RiskCategory::Basic,
        _ => RiskCategory::Decline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(age: u32, feet: u32, inches: u32, pounds: f64, bp: (u16, u16), family: &str) -> RiskInput {
        RiskInput {
            name: "A".into(),
            age,
            feet,
            inches,
            pounds,
            blood_pressure: BloodPressure {
                systolic: bp.0,
                diastolic: bp.1,
            },
            family: family.into(),
        }
    }

    fn bp(systolic: u16, diastolic: u16) -> BloodPressure {
        BloodPressure {
            systolic,
            diastolic,
        }
    }

    #[test]
    fn age_brackets() {
        assert_eq!(age_points(0), 0);
        assert_eq!(age_points(29), 0);
        assert_eq!(age_points(30), 10);
        assert_eq!(age_points(45), 10);
        assert_eq!(age_points(46), 20);
        assert_eq!(age_points(60), 20);
        assert_eq!(age_points(61), 30);
        assert_eq!(age_points(110), 30);
    }

    #[test]
    fn bmi_normal_weight() {
        let i = input(25, 5, 10, 154.0, (110, 70), "none");
        assert!((bmi(&i) - 22.1).abs() < 1e-9);
        assert_eq!(score(&i).bmi_points, 0);
    }

    #[test]
    fn bmi_obese() {
        let i = input(25, 5, 10, 220.0, (110, 70), "none");
        assert!((bmi(&i) - 31.6).abs() < 1e-9);
        assert_eq!(score(&i).bmi_points, 75);
    }

    #[test]
    fn bmi_band_edges() {
        assert_eq!(bmi_band(18.4), (0, BmiCategory::Underweight));
        assert_eq!(bmi_band(18.5), (0, BmiCategory::Normal));
        assert_eq!(bmi_band(24.9), (0, BmiCategory::Normal));
        assert_eq!(bmi_band(25.0), (30, BmiCategory::Overweight));
        assert_eq!(bmi_band(29.9), (30, BmiCategory::Overweight));
        assert_eq!(bmi_band(30.0), (75, BmiCategory::Obese));
        assert_eq!(bmi_band(34.9), (75, BmiCategory::Obese));
        assert_eq!(bmi_band(35.0), (100, BmiCategory::VeryObese));
    }

    #[test]
    fn bmi_is_rounded_before_banding() {
        // Raw 29.97 rounds up into the obese band.
        let i = input(25, 5, 10, 208.85, (110, 70), "none");
        assert_eq!(bmi(&i), 30.0);
        assert_eq!(score(&i).bmi_points, 75);

        let i = input(25, 5, 10, 208.4, (110, 70), "none");
        assert_eq!(bmi(&i), 29.9);
        assert_eq!(score(&i).bmi_points, 30);

        // Raw 24.95 rounds up into the overweight band.
        let i = input(25, 5, 10, 173.9, (110, 70), "none");
        assert_eq!(bmi(&i), 25.0);
        assert_eq!(score(&i).bmi_points, 30);
    }

    #[test]
    fn extreme_height_does_not_overflow() {
        let i = input(25, 400_000_000, 10, 180.0, (110, 70), "none");
        assert_eq!(i.height_inches(), 4_800_000_010.0);
        assert_eq!(bmi(&i), 0.0);
        assert_eq!(score(&i).bmi_points, 0);
    }

    #[test]
    fn underweight_is_unscored() {
        let i = input(25, 6, 2, 110.0, (110, 70), "none");
        assert!(bmi(&i) < 18.5);
        assert_eq!(score(&i).bmi_points, 0);
    }

    #[test]
    fn blood_pressure_bands() {
        assert_eq!(blood_pressure_band(bp(119, 79)), (0, BloodPressureCategory::Normal));
        assert_eq!(blood_pressure_band(bp(125, 79)), (15, BloodPressureCategory::Elevated));
        assert_eq!(blood_pressure_band(bp(135, 85)), (30, BloodPressureCategory::Stage1));
        assert_eq!(blood_pressure_band(bp(150, 70)), (75, BloodPressureCategory::Stage2));
    }

    #[test]
    fn blood_pressure_first_match_wins() {
        // Diastolic 85 hits stage 1 before the systolic >= 140 band is checked.
        assert_eq!(blood_pressure_band(bp(150, 85)).0, 30);
        // 190 systolic is already stage 2; the crisis band is never reached by systolic alone.
        assert_eq!(blood_pressure_band(bp(190, 70)).0, 75);
        assert_eq!(blood_pressure_band(bp(115, 125)).0, 75);
    }

    #[test]
    fn blood_pressure_gap_is_unclassified() {
        assert_eq!(
            blood_pressure_band(bp(139, 75)),
            (0, BloodPressureCategory::Unclassified)
        );
    }

    #[test]
    fn family_keywords_accumulate() {
        assert_eq!(family_points("diabetes, cancer"), 20);
        assert_eq!(family_points("diabetes,cancer,alzheimers"), 30);
        assert_eq!(family_points("none"), 0);
        assert_eq!(family_points("no"), 0);
        assert_eq!(family_points("Mother had DIABETES"), 10);
        assert_eq!(family_points("Alzheimer's on dad's side"), 10);
    }

    #[test]
    fn category_thresholds() {
        assert_eq!(category_for(0), RiskCategory::Best);
        assert_eq!(category_for(20), RiskCategory::Best);
        assert_eq!(category_for(21), RiskCategory::Standard);
        assert_eq!(category_for(50), RiskCategory::Standard);
        assert_eq!(category_for(51), RiskCategory::Basic);
        assert_eq!(category_for(75), RiskCategory::Basic);
        assert_eq!(category_for(76), RiskCategory::Decline);
    }

    #[test]
    fn end_to_end_decline() {
        let i = input(50, 5, 10, 180.0, (130, 85), "none");
        let b = score(&i);
        assert_eq!(b.age_points, 20);
        assert_eq!(b.bmi_points, 30);
        assert_eq!(b.bp_points, 30);
        assert_eq!(b.family_points, 0);
        assert_eq!(b.total, 80);
        assert_eq!(b.category, RiskCategory::Decline);
    }

    #[test]
    fn scoring_is_idempotent() {
        let i = input(50, 5, 10, 180.0, (130, 85), "diabetes");
        assert_eq!(score(&i), score(&i));
        assert_eq!(assess(&i), assess(&i));
    }

    #[test]
    fn assess_matches_score() {
        let i = input(62, 5, 2, 200.0, (145, 95), "cancer");
        let a = assess(&i);
        assert_eq!(a.breakdown(), score(&i));
        assert_eq!(a.details.bmi_category, BmiCategory::VeryObese);
        assert_eq!(a.details.blood_pressure_category, BloodPressureCategory::Stage2);
        assert_eq!(a.input.blood_pressure, "145/95");
    }
}
