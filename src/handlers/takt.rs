//! Takt Time and display unit handlers for GBO MCP server

use crate::GboServerHandler;
use crate::formatting;
use crate::gbo::LineEvent;
use crate::validation;
use mcp_attr::Result as McpResult;

impl GboServerHandler {
    /// Updates the Takt Time inputs. All given fields are applied together or not at all.
    ///
    /// A new `shift_unit` without a `shift_duration` converts the stored duration
    /// into that unit, like switching the unit of the shift field in a form.
    pub async fn handle_set_takt(
        &self,
        shift_duration: Option<f64>,
        shift_unit: Option<String>,
        daily_demand: Option<f64>,
        demand_unit: Option<String>,
    ) -> McpResult<String> {
        let mut events = Vec::new();

        if let Some(ref unit_str) = shift_unit {
            events.push(LineEvent::ChangeShiftUnit(validation::parse_shift_unit(
                unit_str,
            )?));
        }
        if shift_duration.is_some() {
            events.push(LineEvent::SetShiftDuration(shift_duration));
        }
        if daily_demand.is_some() {
            events.push(LineEvent::SetDailyDemand(daily_demand));
        }
        if let Some(label) = demand_unit {
            events.push(LineEvent::SetDemandUnit(label));
        }

        let state = self.transition(events)?;
        let takt = &state.takt;

        let mut result = formatting::format_takt(takt);
        if let Some(duration) = takt.shift_duration {
            result.push_str(&format!(
                "\nShift: {} {}",
                formatting::one_decimal(duration),
                takt.shift_unit
            ));
        }
        if let Some(demand) = takt.daily_demand {
            result.push_str(&format!(
                "\nDaily demand: {} {}/day",
                formatting::one_decimal(demand),
                takt.demand_unit
            ));
        }
        Ok(result)
    }

    /// Clears shift duration and daily demand, leaving Takt Time undefined.
    pub async fn handle_clear_takt(&self) -> McpResult<String> {
        self.transition([LineEvent::ClearTakt])?;
        Ok("Takt Time inputs cleared".to_string())
    }

    /// Changes the unit used to display every operation time.
    pub async fn handle_set_display_unit(&self, unit: String) -> McpResult<String> {
        let unit = validation::parse_time_unit(&unit)?;
        self.transition([LineEvent::SetDisplayUnit(unit)])?;
        Ok(format!("Display unit set to {}", unit))
    }
}
