use std::collections::HashSet;

use chrono::{NaiveDateTime, NaiveTime, Timelike};

use crate::models::Slot;

/// Drop candidates whose start time-of-day equals the start of an occupying booking.
///
/// Only the exact start instant is blocked; a booking's duration never hides the
/// slots that follow it.
pub fn exclude_occupied(slots: &[Slot], occupied_starts: &[NaiveDateTime]) -> Vec<Slot> {
    if occupied_starts.is_empty() {
        return slots.to_vec();
    }

    let taken: HashSet<NaiveTime> = occupied_starts
        .iter()
        .map(|start| to_second(start.time()))
        .collect();

    slots
        .iter()
        .copied()
        .filter(|slot| !taken.contains(&to_second(slot.time())))
        .collect()
}

fn to_second(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn removes_exact_start_only() {
        let slots = [at(9, 45), at(10, 0), at(10, 15)];
        let remaining = exclude_occupied(&slots, &[at(10, 0)]);
        assert_eq!(remaining, vec![at(9, 45), at(10, 15)]);
    }

    #[test]
    fn booking_between_slots_blocks_nothing() {
        let slots = [at(10, 0), at(10, 30)];
        assert_eq!(exclude_occupied(&slots, &[at(10, 10)]), slots.to_vec());
    }

    #[test]
    fn sub_second_booking_times_still_match() {
        let booked = at(11, 0).with_nanosecond(250_000_000).unwrap();
        assert!(exclude_occupied(&[at(11, 0)], &[booked]).is_empty());
    }

    #[test]
    fn no_bookings_pass_through() {
        let slots = [at(8, 0), at(8, 30)];
        assert_eq!(exclude_occupied(&slots, &[]), slots.to_vec());
    }
}
