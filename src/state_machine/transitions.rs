use crate::error::{FleetError, Result};

use super::states::DeviceStatus;

/// States a device may be in when transitioning to `target`.
///
/// Each state accepts transitions from itself and from exactly one adjacent
/// state, forming the cycle stock → installé → maintenance → stock.
pub fn allowed_predecessors(target: DeviceStatus) -> [DeviceStatus; 2] {
    match target {
        DeviceStatus::Stock => [DeviceStatus::Stock, DeviceStatus::Maintenance],
        DeviceStatus::Installed => [DeviceStatus::Installed, DeviceStatus::Stock],
        DeviceStatus::Maintenance => [DeviceStatus::Maintenance, DeviceStatus::Installed],
    }
}

/// Check that a requested status change is reachable from the current state.
///
/// A device with no recorded status has not entered the lifecycle yet, so
/// any target is accepted. The check itself is pure; callers are responsible
/// for running it against a current status read under a row lock so the
/// check and the subsequent update are atomic.
pub fn check_transition(current: Option<DeviceStatus>, target: DeviceStatus) -> Result<()> {
    let Some(current) = current else {
        return Ok(());
    };

    if allowed_predecessors(target).contains(&current) {
        Ok(())
    } else {
        Err(FleetError::StateTransitionError(format!(
            "Cannot change status from {current} to {target}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DeviceStatus::{Installed, Maintenance, Stock};

    #[test]
    fn test_self_transitions_always_allowed() {
        for status in [Stock, Installed, Maintenance] {
            assert!(check_transition(Some(status), status).is_ok());
        }
    }

    #[test]
    fn test_cycle_transitions_allowed() {
        assert!(check_transition(Some(Stock), Installed).is_ok());
        assert!(check_transition(Some(Installed), Maintenance).is_ok());
        assert!(check_transition(Some(Maintenance), Stock).is_ok());
    }

    #[test]
    fn test_transitions_against_the_cycle_rejected() {
        assert!(check_transition(Some(Stock), Maintenance).is_err());
        assert!(check_transition(Some(Installed), Stock).is_err());
        assert!(check_transition(Some(Maintenance), Installed).is_err());
    }

    #[test]
    fn test_rejection_message_names_both_states() {
        let err = check_transition(Some(Stock), Maintenance).unwrap_err();
        assert_eq!(
            err,
            FleetError::StateTransitionError(
                "Cannot change status from stock to maintenance".to_string()
            )
        );
    }

    #[test]
    fn test_unset_status_accepts_any_target() {
        for target in [Stock, Installed, Maintenance] {
            assert!(check_transition(None, target).is_ok());
        }
    }

    #[test]
    fn test_predecessor_table_is_the_directed_cycle() {
        assert_eq!(allowed_predecessors(Stock), [Stock, Maintenance]);
        assert_eq!(allowed_predecessors(Installed), [Installed, Stock]);
        assert_eq!(allowed_predecessors(Maintenance), [Maintenance, Installed]);
    }
}
