//! Property tests over the full device status transition matrix.

use proptest::prelude::*;

use device_fleet::state_machine::{allowed_predecessors, check_transition, DeviceStatus};

fn any_status() -> impl Strategy<Value = DeviceStatus> {
    prop_oneof![
        Just(DeviceStatus::Stock),
        Just(DeviceStatus::Installed),
        Just(DeviceStatus::Maintenance),
    ]
}

proptest! {
    #[test]
    fn transition_allowed_iff_current_is_a_predecessor(
        current in any_status(),
        target in any_status(),
    ) {
        let allowed = allowed_predecessors(target).contains(&current);
        prop_assert_eq!(check_transition(Some(current), target).is_ok(), allowed);
    }

    #[test]
    fn self_transitions_always_succeed(status in any_status()) {
        prop_assert!(check_transition(Some(status), status).is_ok());
    }

    #[test]
    fn every_target_accepts_itself_and_one_other_state(target in any_status()) {
        let predecessors = allowed_predecessors(target);
        prop_assert!(predecessors.contains(&target));
        prop_assert_ne!(predecessors[0], predecessors[1]);
    }

    #[test]
    fn unset_status_accepts_any_target(target in any_status()) {
        prop_assert!(check_transition(None, target).is_ok());
    }

    #[test]
    fn rejection_message_names_both_states(
        current in any_status(),
        target in any_status(),
    ) {
        if let Err(err) = check_transition(Some(current), target) {
            let message = err.to_string();
            prop_assert!(message.contains(&current.to_string()));
            prop_assert!(message.contains(&target.to_string()));
        }
    }
}
