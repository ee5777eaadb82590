pub mod broadcast_service;
