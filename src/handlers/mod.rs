// handlers/mod.rs - HTTP handlers, one module per resource
//
// students  → /api/students, /api/students/:id
// rankings  → /api/rankings
// health    → /health

pub mod health;
pub mod rankings;
pub mod students;
