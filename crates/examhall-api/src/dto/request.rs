//! Request DTOs with validation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use examhall_core::types::{ExamId, RoomId, StaffId};
use examhall_service::GenerateRequest;

/// Body of `POST /api/allotments`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAllotmentRequest {
    /// Exam to seat.
    pub exam_id: i32,
    /// Rooms to fill, in order.
    #[validate(length(min = 1, message = "At least one room is required"))]
    pub room_ids: Vec<i32>,
    /// Invigilators keyed by room id. JSON object keys are the room ids.
    #[serde(default)]
    pub staff_assignments: Option<HashMap<i32, Vec<i32>>>,
}

impl CreateAllotmentRequest {
    /// Converts to the service input.
    pub fn into_generate_request(self) -> GenerateRequest {
        GenerateRequest {
            exam_id: ExamId(self.exam_id),
            room_ids: self.room_ids.into_iter().map(RoomId).collect(),
            staff_assignments: self
                .staff_assignments
                .unwrap_or_default()
                .into_iter()
                .map(|(room_id, staff)| {
                    (RoomId(room_id), staff.into_iter().map(StaffId).collect())
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_string_keyed_staff_map() {
        let req: CreateAllotmentRequest = serde_json::from_str(
            r#"{"examId": 4, "roomIds": [2, 1], "staffAssignments": {"2": [7, 8]}}"#,
        )
        .expect("parse");

        let generate = req.into_generate_request();
        assert_eq!(generate.exam_id, ExamId(4));
        assert_eq!(generate.room_ids, vec![RoomId(2), RoomId(1)]);
        assert_eq!(
            generate.staff_assignments.get(&RoomId(2)),
            Some(&vec![StaffId(7), StaffId(8)])
        );
    }

    #[test]
    fn test_staff_assignments_are_optional() {
        let req: CreateAllotmentRequest =
            serde_json::from_str(r#"{"examId": 1, "roomIds": [3]}"#).expect("parse");
        assert!(req.validate().is_ok());
        assert!(req.into_generate_request().staff_assignments.is_empty());
    }

    #[test]
    fn test_empty_room_list_fails_validation() {
        let req: CreateAllotmentRequest =
            serde_json::from_str(r#"{"examId": 1, "roomIds": []}"#).expect("parse");
        assert!(req.validate().is_err());
    }
}
