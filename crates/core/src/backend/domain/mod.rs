pub mod attendance_sink;
pub mod backend_error;
pub mod face_recognizer;
pub mod group_directory;
pub mod person_registrar;
