//! End-to-end tests against the in-memory backend harness

use std::sync::Arc;

use alcove_api::{ApiClient, ApiError, AuthApi, FeedApi, InvitationsApi, MembersApi, SpacesApi};
use alcove_core::config::ApiConfig;
use alcove_core::core_feed::FeedAccumulator;
use alcove_core::core_session::{AccountRole, Session};
use alcove_core::core_space::{SpaceId, SpaceRole};
use test_harness::Backend;

struct Env {
    backend: Arc<Backend>,
    base_url: String,
    _server: tokio::task::JoinHandle<()>,
}

impl Env {
    async fn start() -> Self {
        let backend = Backend::new();
        let (base_url, server) = test_harness::spawn(backend.clone())
            .await
            .expect("failed to start harness");
        Env {
            backend,
            base_url,
            _server: server,
        }
    }

    fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            ..ApiConfig::default()
        }
    }

    /// Seed an account and build an authenticated client for it
    fn client_for(&self, email: &str, first: &str, last: &str) -> Arc<ApiClient> {
        let token = self.backend.seed_account(email, first, last, "Approved");
        let session = Arc::new(Session::new(
            token,
            email.to_string(),
            format!("{} {}", first, last),
            AccountRole::Approved,
        ));
        Arc::new(ApiClient::with_session(&self.config(), session).expect("client"))
    }
}

#[tokio::test]
async fn create_space_then_listing_includes_it() {
    let env = Env::start().await;
    let spaces = SpacesApi::new(env.client_for("alice@x.com", "Alice", "Hart"));

    let created = spaces.create_space("Chess", "", "").await.unwrap();
    assert_eq!(created.name, "Chess");
    assert_eq!(created.viewer_role, SpaceRole::Admin);
    assert_eq!(created.creator_email, "alice@x.com");

    let listed = spaces.list_my_spaces().await.unwrap();
    assert!(listed.iter().any(|s| s.name == "Chess"));
    assert!(spaces.cached_space(created.id).is_some());
}

#[tokio::test]
async fn details_carry_the_requesters_role() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    let spaces = SpacesApi::new(alice);

    let created = spaces.create_space("Book Club", "monthly reads", "").await.unwrap();
    let details = spaces.space_details(created.id).await.unwrap();

    assert_eq!(details.name, "Book Club");
    assert_eq!(details.description, "monthly reads");
    assert_eq!(details.viewer_role, SpaceRole::Admin);
    assert!(details.viewer_can_invite());
    assert!(details.viewer_can_dissolve());
}

#[tokio::test]
async fn duplicate_invitation_surfaces_conflict() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    env.backend.seed_account("bob@x.com", "Bob", "Stone", "Approved");

    let spaces = SpacesApi::new(alice.clone());
    let invitations = InvitationsApi::new(alice);

    let space = spaces.create_space("Chess", "", "").await.unwrap();
    invitations.invite_user(space.id, "bob@x.com").await.unwrap();

    let second = invitations.invite_user(space.id, "bob@x.com").await;
    match second {
        Err(ApiError::Duplicate(message)) => {
            assert_eq!(message, "An invitation is already pending for this user");
        }
        other => panic!("expected duplicate error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn inviting_an_existing_member_is_a_duplicate() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    let invitations = InvitationsApi::new(alice.clone());
    let spaces = SpacesApi::new(alice);

    let space = spaces.create_space("Chess", "", "").await.unwrap();
    let result = invitations.invite_user(space.id, "alice@x.com").await;
    assert!(matches!(result, Err(ApiError::Duplicate(_))));
}

#[tokio::test]
async fn accepted_invitation_joins_the_directory_as_member() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    let bob = env.client_for("bob@x.com", "Bob", "Stone");

    let alice_spaces = SpacesApi::new(alice.clone());
    let space = alice_spaces.create_space("Chess", "", "").await.unwrap();
    InvitationsApi::new(alice)
        .invite_user(space.id, "bob@x.com")
        .await
        .unwrap();

    let bob_invitations = InvitationsApi::new(bob.clone());
    let pending = bob_invitations.pending_invitations().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].space_name, "Chess");
    assert_eq!(pending[0].inviter_email, "alice@x.com");
    assert!(pending[0].is_pending());

    bob_invitations
        .accept_invitation(pending[0].id)
        .await
        .unwrap();

    let bob_listing = SpacesApi::new(bob.clone());
    let spaces = bob_listing.list_my_spaces().await.unwrap();
    let joined = spaces.iter().find(|s| s.id == space.id).expect("joined space");
    assert_eq!(joined.viewer_role, SpaceRole::Member);
    assert!(!joined.viewer_can_dissolve());

    // The invitation is consumed
    assert!(bob_invitations.pending_invitations().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_admin_cannot_invite_or_dissolve() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    let bob = env.client_for("bob@x.com", "Bob", "Stone");

    let alice_spaces = SpacesApi::new(alice.clone());
    let space = alice_spaces.create_space("Chess", "", "").await.unwrap();
    InvitationsApi::new(alice)
        .invite_user(space.id, "bob@x.com")
        .await
        .unwrap();
    let bob_invitations = InvitationsApi::new(bob.clone());
    let pending = bob_invitations.pending_invitations().await.unwrap();
    bob_invitations.accept_invitation(pending[0].id).await.unwrap();

    env.backend.seed_account("carol@x.com", "Carol", "Reyes", "Approved");
    let invite = InvitationsApi::new(bob.clone())
        .invite_user(space.id, "carol@x.com")
        .await;
    assert!(matches!(invite, Err(ApiError::Authorization(_))));

    let dissolve = SpacesApi::new(bob).dissolve_space(space.id).await;
    assert!(matches!(dissolve, Err(ApiError::Authorization(_))));
}

#[tokio::test]
async fn removed_member_disappears_from_listing() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    let bob = env.client_for("bob@x.com", "Bob", "Stone");

    let spaces = SpacesApi::new(alice.clone());
    let space = spaces.create_space("Chess", "", "").await.unwrap();
    InvitationsApi::new(alice.clone())
        .invite_user(space.id, "bob@x.com")
        .await
        .unwrap();
    let bob_invitations = InvitationsApi::new(bob);
    let pending = bob_invitations.pending_invitations().await.unwrap();
    bob_invitations.accept_invitation(pending[0].id).await.unwrap();

    let members = MembersApi::new(alice);
    assert_eq!(members.list_members(space.id).await.unwrap().len(), 2);

    members.remove_member(space.id, "bob@x.com").await.unwrap();

    let remaining = members.list_members(space.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(!remaining.iter().any(|m| m.email == "bob@x.com"));
}

#[tokio::test]
async fn the_creator_is_never_removable() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");

    let spaces = SpacesApi::new(alice.clone());
    let space = spaces.create_space("Chess", "", "").await.unwrap();

    let result = MembersApi::new(alice)
        .remove_member(space.id, "alice@x.com")
        .await;
    assert!(matches!(result, Err(ApiError::Authorization(_))));
}

#[tokio::test]
async fn dissolve_cascades_and_prunes_the_cache() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");

    let spaces = SpacesApi::new(alice.clone());
    let space = spaces.create_space("Chess", "", "").await.unwrap();
    spaces.list_my_spaces().await.unwrap();
    assert!(spaces.cached_space(space.id).is_some());

    spaces.dissolve_space(space.id).await.unwrap();
    assert!(spaces.cached_space(space.id).is_none());

    let details = spaces.space_details(space.id).await;
    assert!(matches!(details, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn blank_post_content_never_reaches_the_server() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    let feed = FeedApi::new(alice);

    // Space id is irrelevant: validation rejects before any request
    let result = feed.create_post(SpaceId(999), "   ", None).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn feed_paginates_with_the_has_more_heuristic() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    let spaces = SpacesApi::new(alice.clone());
    let feed = FeedApi::new(alice);

    let space = spaces.create_space("Chess", "", "").await.unwrap();
    for i in 0..5 {
        feed.create_post(space.id, &format!("post {}", i), None)
            .await
            .unwrap();
    }

    let mut accumulator = FeedAccumulator::new(5);
    let fetched = feed.fetch_next_page(space.id, &mut accumulator).await.unwrap();
    assert_eq!(fetched, 5);
    // Exactly-full page: the heuristic still reports more
    assert!(accumulator.has_more());

    let fetched = feed.fetch_next_page(space.id, &mut accumulator).await.unwrap();
    assert_eq!(fetched, 0);
    assert!(!accumulator.has_more());
    assert_eq!(accumulator.len(), 5);

    // Newest first
    assert_eq!(accumulator.posts()[0].content, "post 4");
}

#[tokio::test]
async fn deleted_post_leaves_the_local_feed() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    let spaces = SpacesApi::new(alice.clone());
    let feed = FeedApi::new(alice);

    let space = spaces.create_space("Chess", "", "").await.unwrap();
    let post = feed.create_post(space.id, "to be removed", None).await.unwrap();
    feed.create_post(space.id, "stays", None).await.unwrap();

    let mut accumulator = FeedAccumulator::new(20);
    feed.fetch_next_page(space.id, &mut accumulator).await.unwrap();
    assert_eq!(accumulator.len(), 2);

    feed.delete_post(&mut accumulator, post.id).await.unwrap();
    assert_eq!(accumulator.len(), 1);
    assert!(accumulator.posts().iter().all(|p| p.id != post.id));
}

#[tokio::test]
async fn comments_round_trip() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    let spaces = SpacesApi::new(alice.clone());
    let feed = FeedApi::new(alice);

    let space = spaces.create_space("Chess", "", "").await.unwrap();
    let post = feed.create_post(space.id, "opening theory", None).await.unwrap();

    assert!(matches!(
        feed.add_comment(post.id, "\t ").await,
        Err(ApiError::Validation(_))
    ));

    feed.add_comment(post.id, "e4 best by test").await.unwrap();
    let comments = feed.list_comments(post.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "e4 best by test");
    assert_eq!(comments[0].author_name, "Alice Hart");
}

#[tokio::test]
async fn login_round_trip_and_blank_credentials() {
    let env = Env::start().await;
    env.backend.seed_account("alice@x.com", "Alice", "Hart", "Approved");

    let client = Arc::new(ApiClient::new(&env.config()).unwrap());
    let auth = AuthApi::new(client);

    // Blank credentials fail locally, no request issued
    assert!(matches!(
        auth.login("", "").await,
        Err(ApiError::Validation(_))
    ));

    let outcome = auth.login("alice@x.com", "password").await.unwrap();
    assert_eq!(outcome.user.email, "alice@x.com");
    assert!(!outcome.requires_2fa);

    // The returned token authenticates follow-up requests
    let session = Arc::new(outcome.into_session());
    let authed = Arc::new(ApiClient::with_session(&env.config(), session).unwrap());
    SpacesApi::new(authed).list_my_spaces().await.unwrap();
}

#[tokio::test]
async fn unapproved_account_cannot_log_in() {
    let env = Env::start().await;
    env.backend.seed_account("newbie@x.com", "New", "User", "Pending");

    let auth = AuthApi::new(Arc::new(ApiClient::new(&env.config()).unwrap()));
    let result = auth.login("newbie@x.com", "password").await;
    assert!(matches!(result, Err(ApiError::AwaitingApproval)));
}

#[tokio::test]
async fn bad_token_is_an_authorization_error() {
    let env = Env::start().await;
    let session = Arc::new(Session::new(
        "forged".to_string(),
        "evil@x.com".to_string(),
        "Evil".to_string(),
        AccountRole::Approved,
    ));
    let client = Arc::new(ApiClient::with_session(&env.config(), session).unwrap());

    let result = SpacesApi::new(client).list_my_spaces().await;
    match result {
        Err(ApiError::Authorization(message)) => {
            assert_eq!(message, "Invalid or expired token");
        }
        other => panic!("expected authorization error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn invitable_users_shrink_as_invitations_go_out() {
    let env = Env::start().await;
    let alice = env.client_for("alice@x.com", "Alice", "Hart");
    env.backend.seed_account("bob@x.com", "Bob", "Stone", "Approved");
    env.backend.seed_account("carol@x.com", "Carol", "Reyes", "Approved");

    let spaces = SpacesApi::new(alice.clone());
    let invitations = InvitationsApi::new(alice);
    let space = spaces.create_space("Chess", "", "").await.unwrap();

    let candidates = invitations.invitable_users(space.id).await.unwrap();
    let emails: Vec<_> = candidates.iter().map(|u| u.email.as_str()).collect();
    assert!(emails.contains(&"bob@x.com"));
    assert!(emails.contains(&"carol@x.com"));
    assert!(!emails.contains(&"alice@x.com"));

    invitations.invite_user(space.id, "bob@x.com").await.unwrap();
    let candidates = invitations.invitable_users(space.id).await.unwrap();
    assert!(!candidates.iter().any(|u| u.email == "bob@x.com"));

    let found = invitations
        .search_invitable_users(space.id, "carol")
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].email, "carol@x.com");
}
