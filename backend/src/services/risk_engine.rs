//! Risk evaluation engine
//!
//! Pure functions deciding whether a trigger fires against a weather
//! reading, scoring forecast slots, and building alerts with prescriptive
//! actions. Nothing here performs I/O.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{Alert, ForecastPoint, ParametricTrigger, RiskLevel, TriggerCategory, WeatherReading};
use uuid::Uuid;

/// Outcome of checking one trigger against one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TriggerEvaluation {
    /// The condition holds for the observed value
    Fired { observed: Decimal },
    /// The condition was checked and does not hold
    NotMet { observed: Decimal },
    /// The reading carries no value for the trigger's category
    NotApplicable,
}

impl TriggerEvaluation {
    pub fn fired(&self) -> bool {
        matches!(self, TriggerEvaluation::Fired { .. })
    }
}

/// Check a trigger against a reading, keeping "not met" and "not applicable" apart
pub fn assess_trigger(reading: &WeatherReading, trigger: &ParametricTrigger) -> TriggerEvaluation {
    match reading.value_for(trigger.category) {
        Some(observed) if trigger.threshold_operator.compare(observed, trigger.threshold_value) => {
            TriggerEvaluation::Fired { observed }
        }
        Some(observed) => TriggerEvaluation::NotMet { observed },
        None => TriggerEvaluation::NotApplicable,
    }
}

/// Whether the trigger fires for the reading
pub fn evaluate_trigger(reading: &WeatherReading, trigger: &ParametricTrigger) -> bool {
    assess_trigger(reading, trigger).fired()
}

// ============================================================================
// Forecast Risk Scoring
// ============================================================================

fn rainfall_base(amount: Decimal) -> Decimal {
    if amount > Decimal::from(50) {
        Decimal::new(4, 1)
    } else if amount > Decimal::from(25) {
        Decimal::new(2, 1)
    } else {
        Decimal::ZERO
    }
}

fn wind_base(speed: Decimal) -> Decimal {
    if speed > Decimal::from(20) {
        Decimal::new(3, 1)
    } else if speed > Decimal::from(15) {
        Decimal::new(15, 2)
    } else {
        Decimal::ZERO
    }
}

/// Ratio above which a forecast value counts as close to a trigger threshold
const PROXIMITY_RATIO: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Bonus added for each trigger the forecast comes close to
const PROXIMITY_BONUS: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

fn is_near_threshold(forecast: &ForecastPoint, trigger: &ParametricTrigger) -> bool {
    let value = match trigger.category {
        TriggerCategory::Rainfall => forecast.rainfall_amount,
        TriggerCategory::WindSpeed => forecast.wind_speed,
        TriggerCategory::Temperature | TriggerCategory::FloodRisk | TriggerCategory::Drought => {
            return false
        }
    };
    if trigger.threshold_value.is_zero() {
        return false;
    }
    // Overflow means the value dwarfs the threshold
    value
        .checked_div(trigger.threshold_value)
        .map_or(true, |ratio| ratio > PROXIMITY_RATIO)
}

fn applies_to(forecast: &ForecastPoint, trigger: &ParametricTrigger) -> bool {
    trigger.active && trigger.location_id == forecast.location_id
}

/// Score a forecast slot between 0 and 1.
///
/// Base contributions come from rainfall and wind; every active rainfall or
/// wind trigger of the location whose threshold the forecast approaches adds
/// a further bonus. The sum is clamped to 1.
pub fn calculate_risk_score(forecast: &ForecastPoint, triggers: &[ParametricTrigger]) -> Decimal {
    let mut score = rainfall_base(forecast.rainfall_amount) + wind_base(forecast.wind_speed);

    for trigger in triggers.iter().filter(|t| applies_to(forecast, t)) {
        if is_near_threshold(forecast, trigger) {
            score += PROXIMITY_BONUS;
        }
    }

    score.min(Decimal::ONE)
}

/// Ids of the active triggers the forecast slot would fire
pub fn potential_triggers(forecast: &ForecastPoint, triggers: &[ParametricTrigger]) -> Vec<Uuid> {
    triggers
        .iter()
        .filter(|t| applies_to(forecast, t))
        .filter(|t| {
            forecast
                .value_for(t.category)
                .map(|value| t.threshold_operator.compare(value, t.threshold_value))
                .unwrap_or(false)
        })
        .map(|t| t.id)
        .collect()
}

/// Fill in risk score and potential triggers for every forecast slot
pub fn score_forecast(forecast: &mut [ForecastPoint], triggers: &[ParametricTrigger]) {
    for point in forecast.iter_mut() {
        point.risk_score = calculate_risk_score(point, triggers);
        point.potential_triggers = potential_triggers(point, triggers);
    }
}

// ============================================================================
// Alert Factory
// ============================================================================

/// Recommended responses per category, highest priority first
pub fn prescriptive_actions(category: TriggerCategory) -> &'static [&'static str] {
    match category {
        TriggerCategory::Rainfall => &[
            "Deploy emergency drainage equipment",
            "Alert policyholders in affected area",
            "Prepare claims processing team",
            "Activate flood response protocol",
        ],
        TriggerCategory::WindSpeed => &[
            "Issue high wind warning to policyholders",
            "Pre-position damage assessment teams",
            "Review building coverage limits",
            "Activate storm response protocol",
        ],
        TriggerCategory::Temperature => &[
            "Monitor for heat/cold damage claims",
            "Alert agricultural policyholders",
            "Review temperature-sensitive policies",
        ],
        TriggerCategory::FloodRisk => &[
            "Evacuate high-risk areas if needed",
            "Deploy flood barriers",
            "Activate emergency claims hotline",
        ],
        // No playbook has been agreed for drought yet
        TriggerCategory::Drought => &[],
    }
}

/// Build the alert for a trigger that fired against `reading`.
///
/// Severity reflects the observed value relative to the threshold, whichever
/// operator fired.
pub fn create_alert(reading: &WeatherReading, trigger: &ParametricTrigger) -> Alert {
    let current_value = reading.value_for(trigger.category).unwrap_or(Decimal::ZERO);
    let risk_level = RiskLevel::classify(current_value, trigger.threshold_value);

    Alert {
        id: Uuid::new_v4(),
        location_id: trigger.location_id,
        trigger_id: trigger.id,
        risk_level,
        message: format!(
            "{} threshold exceeded: {} {} {}",
            trigger.category,
            current_value,
            trigger.threshold_operator.symbol(),
            trigger.threshold_value
        ),
        current_value,
        threshold_value: trigger.threshold_value,
        triggered_at: Utc::now(),
        resolved: false,
        prescriptive_actions: prescriptive_actions(trigger.category)
            .iter()
            .map(|a| a.to_string())
            .collect(),
    }
}
