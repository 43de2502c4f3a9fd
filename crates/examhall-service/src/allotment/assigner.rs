//! Randomized seat assignment with a bounded anti-clustering swap.
//!
//! Registrants are shuffled uniformly (Fisher-Yates via
//! [`SliceRandom::shuffle`]) and then poured into the rooms in the order
//! the caller listed them, seat 1 upwards. Before a registrant takes seat
//! N > 1 of a room, their department is compared with the occupant of seat
//! N-1 of the same room. On a match the next `lookahead` unconsumed
//! registrants are scanned for someone from another department, and the
//! first one found is swapped into the current position. If none is found
//! the clash is accepted.
//!
//! The heuristic is best-effort: it runs in O(n * lookahead) and does not
//! guarantee that no two neighbours share a department.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use examhall_core::types::DepartmentId;
use examhall_entity::allotment::SeatAssignment;
use examhall_entity::room::Room;
use examhall_entity::student::Registration;

/// Output of one assignment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Seats in production order: room by room, seat 1 upwards.
    pub seats: Vec<SeatAssignment>,
    /// Adjacent same-department pairs the lookahead could not break up.
    pub unresolved_clashes: usize,
}

/// Assigns shuffled registrants to room seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatAssigner {
    lookahead: usize,
}

impl Default for SeatAssigner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOOKAHEAD)
    }
}

impl SeatAssigner {
    /// Positions scanned past the current candidate when resolving a clash.
    pub const DEFAULT_LOOKAHEAD: usize = 9;

    /// Creates an assigner with the given lookahead window.
    pub fn new(lookahead: usize) -> Self {
        Self { lookahead }
    }

    /// Seats every registrant that fits, room by room.
    ///
    /// Rooms are filled in slice order and never re-sorted. Once the
    /// registrants run out the remaining seats and rooms stay empty. The
    /// caller is responsible for checking total capacity beforehand;
    /// registrants beyond it are left unseated.
    pub fn assign<R>(
        &self,
        registrations: &[Registration],
        rooms: &[Room],
        rng: &mut R,
    ) -> Assignment
    where
        R: Rng + ?Sized,
    {
        let mut pool: Vec<&Registration> = registrations.iter().collect();
        pool.shuffle(rng);

        let mut seats = Vec::with_capacity(pool.len());
        let mut unresolved_clashes = 0;
        let mut next = 0;

        for room in rooms {
            let mut previous: Option<DepartmentId> = None;

            for seat_number in 1..=room.capacity {
                if next >= pool.len() {
                    break;
                }

                if let Some(neighbour) = previous {
                    if pool[next].department_id == neighbour {
                        match self.find_swap(&pool, next, neighbour) {
                            Some(candidate) => pool.swap(next, candidate),
                            None => {
                                debug!(
                                    room_id = %room.room_id,
                                    seat_number,
                                    department_id = %neighbour,
                                    "Adjacent same-department seat left unresolved"
                                );
                                unresolved_clashes += 1;
                            }
                        }
                    }
                }

                let seated = pool[next];
                seats.push(SeatAssignment {
                    student_id: seated.student_id.clone(),
                    room_id: room.room_id,
                    seat_number,
                });
                previous = Some(seated.department_id);
                next += 1;
            }
        }

        Assignment {
            seats,
            unresolved_clashes,
        }
    }

    /// First position within the lookahead window whose department differs
    /// from `neighbour`.
    fn find_swap(
        &self,
        pool: &[&Registration],
        current: usize,
        neighbour: DepartmentId,
    ) -> Option<usize> {
        let end = pool
            .len()
            .min(current.saturating_add(1).saturating_add(self.lookahead));
        (current + 1..end).find(|&i| pool[i].department_id != neighbour)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use examhall_core::types::{RoomId, StudentId};

    use super::*;

    fn registration(id: &str, department: i32) -> Registration {
        Registration {
            student_id: StudentId::from(id),
            student_name: format!("Student {id}"),
            department_id: DepartmentId(department),
        }
    }

    fn room(id: i32, capacity: i32) -> Room {
        Room {
            room_id: RoomId(id),
            room_number: format!("R-{id}"),
            capacity,
            room_type: "Classroom".into(),
        }
    }

    fn department_of(registrations: &[Registration]) -> HashMap<StudentId, DepartmentId> {
        registrations
            .iter()
            .map(|r| (r.student_id.clone(), r.department_id))
            .collect()
    }

    fn adjacent_clashes(
        seats: &[SeatAssignment],
        departments: &HashMap<StudentId, DepartmentId>,
    ) -> usize {
        seats
            .windows(2)
            .filter(|pair| {
                pair[0].room_id == pair[1].room_id
                    && departments[&pair[0].student_id] == departments[&pair[1].student_id]
            })
            .count()
    }

    #[test]
    fn test_every_registrant_seated_exactly_once() {
        let registrations: Vec<Registration> = (0..25)
            .map(|i| registration(&format!("S{i:02}"), i % 4))
            .collect();
        let rooms = vec![room(1, 10), room(2, 10), room(3, 10)];
        let mut rng = StdRng::seed_from_u64(7);

        let assignment = SeatAssigner::default().assign(&registrations, &rooms, &mut rng);

        assert_eq!(assignment.seats.len(), 25);
        let unique: HashSet<&StudentId> =
            assignment.seats.iter().map(|s| &s.student_id).collect();
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn test_rooms_filled_in_caller_order_with_contiguous_seats() {
        let registrations: Vec<Registration> = (0..7)
            .map(|i| registration(&format!("S{i}"), i))
            .collect();
        let rooms = vec![room(9, 4), room(2, 4), room(5, 4)];
        let mut rng = StdRng::seed_from_u64(11);

        let assignment = SeatAssigner::default().assign(&registrations, &rooms, &mut rng);

        let layout: Vec<(RoomId, i32)> = assignment
            .seats
            .iter()
            .map(|s| (s.room_id, s.seat_number))
            .collect();
        assert_eq!(
            layout,
            vec![
                (RoomId(9), 1),
                (RoomId(9), 2),
                (RoomId(9), 3),
                (RoomId(9), 4),
                (RoomId(2), 1),
                (RoomId(2), 2),
                (RoomId(2), 3),
            ]
        );
    }

    #[test]
    fn test_two_departments_alternate_when_pool_is_small() {
        let registrations = vec![
            registration("A1", 1),
            registration("A2", 1),
            registration("B1", 2),
            registration("B2", 2),
        ];
        let rooms = vec![room(1, 2), room(2, 2)];
        let departments = department_of(&registrations);

        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assignment = SeatAssigner::default().assign(&registrations, &rooms, &mut rng);
            assert_eq!(adjacent_clashes(&assignment.seats, &departments), 0, "seed {seed}");
            assert_eq!(assignment.unresolved_clashes, 0);
        }
    }

    #[test]
    fn test_single_department_accepts_clashes() {
        let registrations: Vec<Registration> = (0..5)
            .map(|i| registration(&format!("S{i}"), 3))
            .collect();
        let rooms = vec![room(1, 5)];
        let mut rng = StdRng::seed_from_u64(1);

        let assignment = SeatAssigner::default().assign(&registrations, &rooms, &mut rng);

        assert_eq!(assignment.seats.len(), 5);
        assert_eq!(assignment.unresolved_clashes, 4);
    }

    #[test]
    fn test_zero_lookahead_never_swaps() {
        let registrations = vec![
            registration("A1", 1),
            registration("A2", 1),
            registration("B1", 2),
        ];
        let rooms = vec![room(1, 3)];
        let departments = department_of(&registrations);

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assignment = SeatAssigner::new(0).assign(&registrations, &rooms, &mut rng);
            assert_eq!(
                assignment.unresolved_clashes,
                adjacent_clashes(&assignment.seats, &departments)
            );
        }
    }

    #[test]
    fn test_window_does_not_reach_past_lookahead() {
        let pool_owned = vec![
            registration("A0", 1),
            registration("A1", 1),
            registration("A2", 1),
            registration("B0", 2),
        ];
        let pool: Vec<&Registration> = pool_owned.iter().collect();

        assert_eq!(SeatAssigner::new(1).find_swap(&pool, 1, DepartmentId(1)), None);
        assert_eq!(SeatAssigner::new(2).find_swap(&pool, 1, DepartmentId(1)), Some(3));
        assert_eq!(SeatAssigner::new(9).find_swap(&pool, 1, DepartmentId(1)), Some(3));
        assert_eq!(SeatAssigner::new(9).find_swap(&pool, 3, DepartmentId(1)), None);
    }

    #[test]
    fn test_first_seat_of_each_room_ignores_previous_room() {
        let registrations = vec![registration("A1", 1), registration("A2", 1)];
        let rooms = vec![room(1, 1), room(2, 1)];
        let mut rng = StdRng::seed_from_u64(3);

        let assignment = SeatAssigner::default().assign(&registrations, &rooms, &mut rng);

        assert_eq!(assignment.unresolved_clashes, 0);
        assert_eq!(assignment.seats[1].seat_number, 1);
    }

    #[test]
    fn test_excess_rooms_stay_empty() {
        let registrations = vec![registration("A1", 1), registration("B1", 2)];
        let rooms = vec![room(1, 30), room(2, 30)];
        let mut rng = StdRng::seed_from_u64(5);

        let assignment = SeatAssigner::default().assign(&registrations, &rooms, &mut rng);

        assert!(assignment.seats.iter().all(|s| s.room_id == RoomId(1)));
    }

    #[test]
    fn test_same_seed_same_assignment() {
        let registrations: Vec<Registration> = (0..12)
            .map(|i| registration(&format!("S{i}"), i % 3))
            .collect();
        let rooms = vec![room(1, 6), room(2, 6)];

        let first = SeatAssigner::default().assign(
            &registrations,
            &rooms,
            &mut StdRng::seed_from_u64(99),
        );
        let second = SeatAssigner::default().assign(
            &registrations,
            &rooms,
            &mut StdRng::seed_from_u64(99),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_reaches_every_first_seat() {
        let registrations: Vec<Registration> = (0..4)
            .map(|i| registration(&format!("S{i}"), i))
            .collect();
        let rooms = vec![room(1, 4)];
        let mut rng = StdRng::seed_from_u64(2024);
        let mut first_seat = HashMap::new();

        for _ in 0..4000 {
            let assignment = SeatAssigner::default().assign(&registrations, &rooms, &mut rng);
            *first_seat
                .entry(assignment.seats[0].student_id.clone())
                .or_insert(0usize) += 1;
        }

        assert_eq!(first_seat.len(), 4);
        for count in first_seat.values() {
            assert!((800..1200).contains(count), "skewed first seat: {first_seat:?}");
        }
    }
}
