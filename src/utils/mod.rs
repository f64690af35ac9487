pub mod invite_code;
