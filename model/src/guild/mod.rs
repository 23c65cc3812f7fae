mod role;
pub use role::Role;

mod member;
pub use member::Member;
