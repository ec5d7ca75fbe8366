//! Authentication and authorization.
//!
//! One identity claim (an email), one transport (an HTTP-only cookie), one rule (owner match).
//!
//! ```text
//! POST /jwt ──► session::create_session_token ──► Set-Cookie: token=<jwt>
//!
//! request ──► middleware::authenticate ──► Principal ──► guard::OwnerScope ──► handler
//!               │ 401                                      │ 403
//! ```
//!
//! # Modules
//!
//! - [`session`]: HS256 token issuing and verification
//! - [`cookie`]: `Set-Cookie` formatting and `Cookie` parsing
//! - [`middleware`]: the Token Verifier, as a function and as router middleware
//! - [`current_user`]: the `Principal` extractor
//! - [`guard`]: the Ownership Guard (`OwnerScope` extractor)
//!
//! # Usage in Handlers
//!
//! ```ignore
//! async fn my_bookings(scope: OwnerScope, State(state): State<AppState>) -> Result<Json<Vec<BookingResponse>>> {
//!     let bookings = state.store.list_bookings(&scope.filter(false)).await?;
//!     Ok(Json(bookings.into_iter().map(Into::into).collect()))
//! }
//! ```

pub mod cookie;
pub mod current_user;
pub mod guard;
pub mod middleware;
pub mod session;
