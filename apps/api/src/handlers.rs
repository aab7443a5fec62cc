pub mod effective_role;
pub mod health;
pub mod memberships;
pub mod rules;
