//! Per-session widget values
//!
//! Holds what a dashboard user has entered so far. A `Session` is owned by
//! its caller and handed to the view router explicitly.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{FinancialInputs, ScenarioInputs};

/// Every input widget on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Widget {
    RenewableEnergy,
    WasteReduction,
    TransportEfficiency,
    RenewableCost,
    WasteCost,
    TransportCost,
}

impl Widget {
    pub const ALL: [Widget; 6] = [
        Widget::RenewableEnergy,
        Widget::WasteReduction,
        Widget::TransportEfficiency,
        Widget::RenewableCost,
        Widget::WasteCost,
        Widget::TransportCost,
    ];

    pub const SCENARIO: [Widget; 3] = [
        Widget::RenewableEnergy,
        Widget::WasteReduction,
        Widget::TransportEfficiency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Widget::RenewableEnergy => "Increase renewable energy (%)",
            Widget::WasteReduction => "Reduce waste (%)",
            Widget::TransportEfficiency => "Improve transport efficiency (%)",
            Widget::RenewableCost => "Cost of switching to renewables ($/MWh)",
            Widget::WasteCost => "Cost of waste reduction ($/ton)",
            Widget::TransportCost => "Cost of transport upgrades ($/vehicle)",
        }
    }

    /// Inclusive (min, max)
    pub fn range(self) -> (f64, f64) {
        match self {
            Widget::RenewableEnergy | Widget::WasteReduction | Widget::TransportEfficiency => {
                (0.0, 100.0)
            }
            Widget::RenewableCost => (50.0, 200.0),
            Widget::WasteCost => (10.0, 100.0),
            Widget::TransportCost => (500.0, 5000.0),
        }
    }

    pub fn default_value(self) -> f64 {
        match self {
            Widget::RenewableEnergy => 50.0,
            Widget::WasteReduction => 30.0,
            Widget::TransportEfficiency => 20.0,
            Widget::RenewableCost => 100.0,
            Widget::WasteCost => 50.0,
            Widget::TransportCost => 2000.0,
        }
    }

    /// Scenario sliders only take whole percentages
    pub fn clamp(self, value: f64) -> f64 {
        let (min, max) = self.range();
        if value.is_nan() {
            return self.default_value();
        }
        let value = if Self::SCENARIO.contains(&self) {
            value.round()
        } else {
            value
        };
        value.clamp(min, max)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    values: BTreeMap<Widget, f64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, or the widget's default when never set
    pub fn get(&self, widget: Widget) -> f64 {
        self.values
            .get(&widget)
            .copied()
            .unwrap_or_else(|| widget.default_value())
    }

    /// Store a value, clamped into the widget's range; returns what was stored
    pub fn set(&mut self, widget: Widget, value: f64) -> f64 {
        let clamped = widget.clamp(value);
        self.values.insert(widget, clamped);
        clamped
    }

    pub fn with(mut self, widget: Widget, value: f64) -> Self {
        self.set(widget, value);
        self
    }

    pub fn is_set(&self, widget: Widget) -> bool {
        self.values.contains_key(&widget)
    }

    /// True once any scenario slider has been touched in this session
    pub fn has_scenario(&self) -> bool {
        Widget::SCENARIO.iter().any(|w| self.is_set(*w))
    }

    pub fn scenario_inputs(&self) -> ScenarioInputs {
        ScenarioInputs {
            renewable_pct: self.get(Widget::RenewableEnergy),
            waste_pct: self.get(Widget::WasteReduction),
            transport_pct: self.get(Widget::TransportEfficiency),
        }
    }

    pub fn financial_inputs(&self) -> FinancialInputs {
        FinancialInputs {
            renewable_cost_per_mwh: self.get(Widget::RenewableCost),
            waste_cost_per_ton: self.get(Widget::WasteCost),
            transport_cost_per_vehicle: self.get(Widget::TransportCost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_widgets_read_their_defaults() {
        let session = Session::new();
        assert_eq!(
            session.scenario_inputs(),
            ScenarioInputs {
                renewable_pct: 50.0,
                waste_pct: 30.0,
                transport_pct: 20.0,
            }
        );
        assert_eq!(
            session.financial_inputs(),
            FinancialInputs {
                renewable_cost_per_mwh: 100.0,
                waste_cost_per_ton: 50.0,
                transport_cost_per_vehicle: 2000.0,
            }
        );
        assert!(!session.has_scenario());
    }

    #[test]
    fn writes_are_clamped_to_widget_range() {
        let mut session = Session::new();
        assert_eq!(session.set(Widget::RenewableEnergy, 140.0), 100.0);
        assert_eq!(session.set(Widget::WasteCost, 1.0), 10.0);
        assert_eq!(session.set(Widget::TransportCost, 9000.0), 5000.0);
        assert_eq!(session.set(Widget::WasteReduction, f64::NAN), 30.0);
        assert!(session.has_scenario());
    }

    #[test]
    fn scenario_sliders_store_whole_percentages() {
        let mut session = Session::new();
        assert_eq!(session.set(Widget::WasteReduction, 33.7), 34.0);
        assert_eq!(session.set(Widget::RenewableEnergy, 99.6), 100.0);
        assert_eq!(session.get(Widget::WasteReduction), 34.0);
        assert_eq!(session.set(Widget::WasteCost, 75.5), 75.5);
    }

    #[test]
    fn sessions_are_independent() {
        let a = Session::new().with(Widget::TransportEfficiency, 90.0);
        let b = Session::new();
        assert_eq!(a.get(Widget::TransportEfficiency), 90.0);
        assert_eq!(b.get(Widget::TransportEfficiency), 20.0);
    }
}
