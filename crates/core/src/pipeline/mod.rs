pub mod commit_attendance_use_case;
pub mod mark_attendance_use_case;
pub mod register_person_use_case;
