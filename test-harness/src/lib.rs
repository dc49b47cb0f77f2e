//! In-memory Alcove backend
//!
//! Implements the endpoint table the client consumes, with the server-side
//! policies the client can only observe: duplicate invitations and
//! already-a-member both answer 409, role violations answer 403, and every
//! failure body is `{message}`. Backed by a single mutex-guarded state;
//! throughput is irrelevant here, fidelity of the contract is the point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

type HandlerError = (StatusCode, Json<Value>);
type HandlerResult = Result<Json<Value>, HandlerError>;

fn failure(status: StatusCode, message: &str) -> HandlerError {
    (status, Json(json!({ "message": message })))
}

/// Shared in-memory backend state
pub struct Backend {
    state: Mutex<BackendState>,
}

#[derive(Default)]
struct BackendState {
    accounts: Vec<Account>,
    /// Bearer token -> account email
    tokens: HashMap<String, String>,
    spaces: HashMap<u64, SpaceState>,
    invitations: HashMap<u64, InvitationState>,
    next_id: u64,
}

#[derive(Clone)]
struct Account {
    email: String,
    first_name: String,
    last_name: String,
    school: String,
    role: String,
    password: String,
}

impl Account {
    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn to_json(&self) -> Value {
        json!({
            "Email": self.email,
            "FirstName": self.first_name,
            "LastName": self.last_name,
            "SchoolName": self.school,
            "Role": self.role,
        })
    }
}

struct SpaceState {
    id: u64,
    name: String,
    description: String,
    avatar_url: String,
    creator_email: String,
    created_at: DateTime<Utc>,
    members: Vec<MemberState>,
    posts: Vec<PostState>,
}

impl SpaceState {
    fn member(&self, email: &str) -> Option<&MemberState> {
        self.members.iter().find(|m| m.email == email)
    }

    fn is_admin(&self, email: &str) -> bool {
        self.member(email).map(|m| m.role == "admin").unwrap_or(false)
    }

    fn to_json(&self, viewer_role: Option<&str>) -> Value {
        let mut space = json!({
            "space_id": self.id,
            "name": self.name,
            "description": self.description,
            "avatar_url": self.avatar_url,
            "creator_email": self.creator_email,
            "created_at": self.created_at.to_rfc3339(),
            "member_count": self.members.len(),
            "post_count": self.posts.len(),
        });
        if let Some(role) = viewer_role {
            space["user_role"] = json!(role);
        }
        space
    }
}

struct MemberState {
    email: String,
    name: String,
    role: String,
    joined_at: DateTime<Utc>,
}

impl MemberState {
    fn to_json(&self) -> Value {
        json!({
            "email": self.email,
            "name": self.name,
            "role": self.role,
            "joined_at": self.joined_at.to_rfc3339(),
        })
    }
}

struct PostState {
    id: u64,
    space_id: u64,
    author_email: String,
    author_name: String,
    content: String,
    file_url: Option<String>,
    created_at: DateTime<Utc>,
    comments: Vec<CommentState>,
}

impl PostState {
    fn to_json(&self) -> Value {
        json!({
            "post_id": self.id,
            "author_email": self.author_email,
            "author_name": self.author_name,
            "content": self.content,
            "file_url": self.file_url,
            "created_at": self.created_at.to_rfc3339(),
            "comment_count": self.comments.len(),
        })
    }
}

struct CommentState {
    content: String,
    author_name: String,
    created_at: DateTime<Utc>,
}

struct InvitationState {
    id: u64,
    space_id: u64,
    inviter_email: String,
    invitee_email: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl Backend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(BackendState::default()),
        })
    }

    /// Register an account with the given role and hand back a bearer
    /// token, as if it had logged in
    pub fn seed_account(&self, email: &str, first: &str, last: &str, role: &str) -> String {
        let mut state = self.lock();
        state.accounts.push(Account {
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            school: String::new(),
            role: role.to_string(),
            password: "password".to_string(),
        });

        let token = Uuid::new_v4().to_string();
        state.tokens.insert(token.clone(), email.to_string());
        token
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("backend state lock poisoned")
    }
}

impl BackendState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<String, HandlerError> {
        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Missing bearer token"))?;

        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
    }

    fn account(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    fn display_name(&self, email: &str) -> String {
        self.account(email)
            .map(|a| a.display_name())
            .unwrap_or_else(|| email.to_string())
    }

    fn space(&self, id: u64) -> Result<&SpaceState, HandlerError> {
        self.spaces
            .get(&id)
            .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Space not found"))
    }

    fn login_response(&mut self, email: &str) -> HandlerResult {
        let account = self
            .account(email)
            .cloned()
            .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Unknown account"))?;

        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), account.email.clone());

        Ok(Json(json!({
            "token": token,
            "user": account.to_json(),
            "requires_2fa": false,
        })))
    }
}

/// Build the router over a shared backend
pub fn router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/api/auth/google", post(social_login))
        .route("/api/auth/linkedin", post(social_login))
        .route("/api/auth/social", post(apple_login))
        .route("/createPrivateSpace", post(create_space))
        .route("/getUserPrivateSpaces", get(list_my_spaces))
        .route("/getPrivateSpaceDetails/:id", get(space_details))
        .route("/inviteToPrivateSpace/:id", post(invite_user))
        .route("/acceptPrivateSpaceInvitation/:id", post(accept_invitation))
        .route("/getPendingInvitations", get(pending_invitations))
        .route("/getPrivateSpaceMembers/:id", get(list_members))
        .route("/removePrivateSpaceMember/:id/:email", delete(remove_member))
        .route("/dissolvePrivateSpace/:id", delete(dissolve_space))
        .route("/createPrivateSpacePost/:id", post(create_post))
        .route("/getPrivateSpacePosts/:id", get(list_posts))
        .route("/deletePrivateSpacePost/:id", delete(delete_post))
        .route("/addPrivateSpaceComment/:id", post(add_comment))
        .route("/getPrivateSpaceComments/:id", get(list_comments))
        .route("/getInvitableUsers/:id", get(invitable_users))
        .route("/searchInvitableUsers/:id", get(search_invitable_users))
        .route("/getPendingUsers", get(pending_users))
        .route("/getApprovedUsers", get(approved_users))
        .route("/approveUser", post(approve_user))
        .route("/deleteUser/:email", delete(delete_user))
        .route("/changeInfo", post(change_info))
        .with_state(backend)
}

/// Bind an ephemeral port and serve in the background. Returns the base
/// URL for a client config.
pub async fn spawn(backend: Arc<Backend>) -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(backend);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("harness server stopped: {}", e);
        }
    });

    Ok((format!("http://{}", addr), handle))
}

async fn login(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> HandlerResult {
    let mut state = backend.lock();

    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();

    let valid = state
        .account(&username)
        .map(|a| a.password == password)
        .unwrap_or(false);
    if !valid {
        return Err(failure(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }

    state.login_response(&username)
}

/// Authorization-code providers: the code stands in for a verified
/// identity, mapped to a fixed federated account
async fn social_login(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> HandlerResult {
    if body["code"].as_str().unwrap_or_default().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Missing authorization code"));
    }

    let mut state = backend.lock();
    if state.account("federated@alcove.test").is_none() {
        state.accounts.push(Account {
            email: "federated@alcove.test".to_string(),
            first_name: "Federated".to_string(),
            last_name: "User".to_string(),
            school: String::new(),
            role: "Approved".to_string(),
            password: String::new(),
        });
    }
    state.login_response("federated@alcove.test")
}

async fn apple_login(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> HandlerResult {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if email.is_empty() || body["identityToken"].as_str().unwrap_or_default().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Missing Apple credential"));
    }

    let mut state = backend.lock();
    if state.account(&email).is_none() {
        state.accounts.push(Account {
            email: email.clone(),
            first_name: body["firstName"].as_str().unwrap_or("Apple").to_string(),
            last_name: body["lastName"].as_str().unwrap_or("User").to_string(),
            school: String::new(),
            role: "Approved".to_string(),
            password: String::new(),
        });
    }
    state.login_response(&email)
}

async fn create_space(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> HandlerResult {
    let mut state = backend.lock();
    let email = state.authenticate(&headers)?;

    let name = body["name"].as_str().unwrap_or_default().to_string();
    if name.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Space name is required"));
    }

    let id = state.next_id();
    let creator_name = state.display_name(&email);
    let space = SpaceState {
        id,
        name,
        description: body["description"].as_str().unwrap_or_default().to_string(),
        avatar_url: body["avatarUrl"].as_str().unwrap_or_default().to_string(),
        creator_email: email.clone(),
        created_at: Utc::now(),
        members: vec![MemberState {
            email,
            name: creator_name,
            role: "admin".to_string(),
            joined_at: Utc::now(),
        }],
        posts: Vec::new(),
    };

    let response = space.to_json(Some("admin"));
    state.spaces.insert(id, space);
    Ok(Json(response))
}

async fn list_my_spaces(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> HandlerResult {
    let state = backend.lock();
    let email = state.authenticate(&headers)?;

    let spaces: Vec<Value> = state
        .spaces
        .values()
        .filter_map(|s| s.member(&email).map(|m| s.to_json(Some(&m.role))))
        .collect();

    Ok(Json(json!({ "spaces": spaces })))
}

async fn space_details(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> HandlerResult {
    let state = backend.lock();
    let email = state.authenticate(&headers)?;
    let space = state.space(id)?;

    let member = space
        .member(&email)
        .ok_or_else(|| failure(StatusCode::FORBIDDEN, "You are not a member of this space"))?;

    Ok(Json(json!({
        "space": space.to_json(None),
        "user_role": member.role,
    })))
}

async fn invite_user(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> HandlerResult {
    let mut state = backend.lock();
    let email = state.authenticate(&headers)?;

    let invitee = body["inviteeEmail"].as_str().unwrap_or_default().to_string();
    if invitee.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "inviteeEmail is required"));
    }

    let space = state.space(id)?;
    if !space.is_admin(&email) {
        return Err(failure(StatusCode::FORBIDDEN, "Only admins can invite members"));
    }
    if space.member(&invitee).is_some() {
        return Err(failure(
            StatusCode::CONFLICT,
            "User is already a member of this space",
        ));
    }
    let duplicate = state
        .invitations
        .values()
        .any(|i| i.space_id == id && i.invitee_email == invitee && i.status == "pending");
    if duplicate {
        return Err(failure(
            StatusCode::CONFLICT,
            "An invitation is already pending for this user",
        ));
    }

    let invitation_id = state.next_id();
    state.invitations.insert(
        invitation_id,
        InvitationState {
            id: invitation_id,
            space_id: id,
            inviter_email: email,
            invitee_email: invitee,
            status: "pending".to_string(),
            created_at: Utc::now(),
        },
    );

    Ok(Json(json!({ "message": "Invitation sent" })))
}

async fn accept_invitation(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> HandlerResult {
    let mut state = backend.lock();
    let email = state.authenticate(&headers)?;

    let (space_id, invitee) = {
        let invitation = state
            .invitations
            .get(&id)
            .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Invitation not found"))?;

        if invitation.invitee_email != email {
            return Err(failure(
                StatusCode::FORBIDDEN,
                "Invitation is addressed to another user",
            ));
        }
        if invitation.status != "pending" {
            return Err(failure(
                StatusCode::CONFLICT,
                "Invitation has already been resolved",
            ));
        }
        (invitation.space_id, invitation.invitee_email.clone())
    };

    let name = state.display_name(&invitee);
    let space = state
        .spaces
        .get_mut(&space_id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Space no longer exists"))?;
    space.members.push(MemberState {
        email: invitee,
        name,
        role: "member".to_string(),
        joined_at: Utc::now(),
    });

    if let Some(invitation) = state.invitations.get_mut(&id) {
        invitation.status = "accepted".to_string();
    }

    Ok(Json(json!({ "message": "Invitation accepted" })))
}

async fn pending_invitations(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
) -> HandlerResult {
    let state = backend.lock();
    let email = state.authenticate(&headers)?;

    let invitations: Vec<Value> = state
        .invitations
        .values()
        .filter(|i| i.invitee_email == email && i.status == "pending")
        .map(|i| {
            let space_name = state
                .spaces
                .get(&i.space_id)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            json!({
                "invitation_id": i.id,
                "space_id": i.space_id,
                "space_name": space_name,
                "inviter_email": i.inviter_email,
                "inviter_name": state.display_name(&i.inviter_email),
                "invitee_email": i.invitee_email,
                "status": i.status,
                "created_at": i.created_at.to_rfc3339(),
            })
        })
        .collect();

    Ok(Json(json!({ "invitations": invitations })))
}

async fn list_members(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> HandlerResult {
    let state = backend.lock();
    state.authenticate(&headers)?;
    let space = state.space(id)?;

    let members: Vec<Value> = space.members.iter().map(MemberState::to_json).collect();
    Ok(Json(json!({ "members": members })))
}

async fn remove_member(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path((id, target)): Path<(u64, String)>,
) -> HandlerResult {
    let mut state = backend.lock();
    let email = state.authenticate(&headers)?;

    let space = state
        .spaces
        .get_mut(&id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Space not found"))?;

    if !space.is_admin(&email) {
        return Err(failure(StatusCode::FORBIDDEN, "Only admins can remove members"));
    }

    let member = space
        .member(&target)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Member not found"))?;
    if member.role == "admin" {
        return Err(failure(StatusCode::FORBIDDEN, "Admins cannot be removed"));
    }

    space.members.retain(|m| m.email != target);
    Ok(Json(json!({ "message": "Member removed" })))
}

async fn dissolve_space(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> HandlerResult {
    let mut state = backend.lock();
    let email = state.authenticate(&headers)?;

    {
        let space = state.space(id)?;
        if !space.is_admin(&email) {
            return Err(failure(
                StatusCode::FORBIDDEN,
                "Only admins can dissolve a space",
            ));
        }
    }

    // Cascade: posts and comments die with the space, invitations with it
    state.spaces.remove(&id);
    state.invitations.retain(|_, i| i.space_id != id);

    Ok(Json(json!({ "message": "Space dissolved" })))
}

async fn create_post(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> HandlerResult {
    let mut state = backend.lock();
    let email = state.authenticate(&headers)?;

    let content = body["content"].as_str().unwrap_or_default().to_string();
    if content.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Post content is required"));
    }

    {
        let space = state.space(id)?;
        if space.member(&email).is_none() {
            return Err(failure(
                StatusCode::FORBIDDEN,
                "Only members can post in this space",
            ));
        }
    }

    let post_id = state.next_id();
    let author_name = state.display_name(&email);
    let post = PostState {
        id: post_id,
        space_id: id,
        author_email: email,
        author_name,
        content,
        file_url: body["fileUrl"].as_str().map(String::from),
        created_at: Utc::now(),
        comments: Vec::new(),
    };

    let response = post.to_json();
    if let Some(space) = state.spaces.get_mut(&id) {
        space.posts.push(post);
    }
    Ok(Json(response))
}

#[derive(serde::Deserialize)]
struct PageQuery {
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    20
}

async fn list_posts(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> HandlerResult {
    let state = backend.lock();
    state.authenticate(&headers)?;
    let space = state.space(id)?;

    // Newest first; ids are monotonic
    let mut posts: Vec<&PostState> = space.posts.iter().collect();
    posts.sort_by(|a, b| b.id.cmp(&a.id));

    let page = query.page.max(1);
    let start = (page - 1) * query.limit;
    let page_items: Vec<Value> = posts
        .into_iter()
        .skip(start)
        .take(query.limit)
        .map(|p| p.to_json())
        .collect();

    Ok(Json(json!({ "posts": page_items })))
}

async fn delete_post(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> HandlerResult {
    let mut state = backend.lock();
    let email = state.authenticate(&headers)?;

    let space_id = state
        .spaces
        .values()
        .find(|s| s.posts.iter().any(|p| p.id == id))
        .map(|s| s.id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Post not found"))?;

    let space = state
        .spaces
        .get_mut(&space_id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Space not found"))?;

    let author_email = space
        .posts
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.author_email.clone())
        .unwrap_or_default();

    if author_email != email && !space.is_admin(&email) {
        return Err(failure(
            StatusCode::FORBIDDEN,
            "Only the author or an admin can delete a post",
        ));
    }

    space.posts.retain(|p| p.id != id);
    Ok(Json(json!({ "message": "Post deleted" })))
}

async fn add_comment(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> HandlerResult {
    let mut state = backend.lock();
    let email = state.authenticate(&headers)?;

    let content = body["content"].as_str().unwrap_or_default().to_string();
    if content.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Comment content is required"));
    }

    let author_name = state.display_name(&email);
    let comment = CommentState {
        content,
        author_name: author_name.clone(),
        created_at: Utc::now(),
    };

    let response = json!({
        "content": comment.content,
        "author_name": comment.author_name,
        "created_at": comment.created_at.to_rfc3339(),
    });

    let post = state
        .spaces
        .values_mut()
        .flat_map(|s| s.posts.iter_mut())
        .find(|p| p.id == id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Post not found"))?;
    post.comments.push(comment);

    Ok(Json(response))
}

async fn list_comments(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> HandlerResult {
    let state = backend.lock();
    state.authenticate(&headers)?;

    let post = state
        .spaces
        .values()
        .flat_map(|s| s.posts.iter())
        .find(|p| p.id == id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Post not found"))?;

    let comments: Vec<Value> = post
        .comments
        .iter()
        .map(|c| {
            json!({
                "content": c.content,
                "author_name": c.author_name,
                "created_at": c.created_at.to_rfc3339(),
            })
        })
        .collect();

    Ok(Json(json!({ "comments": comments })))
}

fn invitable_accounts(state: &BackendState, space_id: u64) -> Result<Vec<Value>, HandlerError> {
    let space = state.space(space_id)?;

    Ok(state
        .accounts
        .iter()
        .filter(|a| a.role == "Approved" || a.role == "Admin")
        .filter(|a| space.member(&a.email).is_none())
        .filter(|a| {
            !state.invitations.values().any(|i| {
                i.space_id == space_id && i.invitee_email == a.email && i.status == "pending"
            })
        })
        .map(|a| {
            json!({
                "email": a.email,
                "name": a.display_name(),
                "schoolname": a.school,
            })
        })
        .collect())
}

async fn invitable_users(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> HandlerResult {
    let state = backend.lock();
    state.authenticate(&headers)?;
    Ok(Json(json!({ "users": invitable_accounts(&state, id)? })))
}

#[derive(serde::Deserialize)]
struct SearchQuery {
    #[serde(default)]
    query: String,
}

async fn search_invitable_users(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(search): Query<SearchQuery>,
) -> HandlerResult {
    let state = backend.lock();
    state.authenticate(&headers)?;

    let needle = search.query.to_lowercase();
    let users: Vec<Value> = invitable_accounts(&state, id)?
        .into_iter()
        .filter(|u| {
            u["email"].as_str().unwrap_or_default().to_lowercase().contains(&needle)
                || u["name"].as_str().unwrap_or_default().to_lowercase().contains(&needle)
        })
        .collect();

    Ok(Json(json!({ "users": users })))
}

async fn pending_users(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> HandlerResult {
    list_accounts_with_role(backend, headers, "Pending")
}

async fn approved_users(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> HandlerResult {
    list_accounts_with_role(backend, headers, "Approved")
}

fn list_accounts_with_role(backend: Arc<Backend>, headers: HeaderMap, role: &str) -> HandlerResult {
    let state = backend.lock();
    state.authenticate(&headers)?;

    let data: Vec<Value> = state
        .accounts
        .iter()
        .filter(|a| a.role == role)
        .map(Account::to_json)
        .collect();

    Ok(Json(json!({ "data": data })))
}

async fn approve_user(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> HandlerResult {
    let mut state = backend.lock();
    state.authenticate(&headers)?;

    let email = body["email"].as_str().unwrap_or_default();
    let account = state
        .accounts
        .iter_mut()
        .find(|a| a.email == email)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "User not found"))?;

    account.role = "Approved".to_string();
    Ok(Json(json!({ "message": "User is approved" })))
}

async fn delete_user(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(email): Path<String>,
) -> HandlerResult {
    let mut state = backend.lock();
    state.authenticate(&headers)?;

    let before = state.accounts.len();
    state.accounts.retain(|a| a.email != email);
    if state.accounts.len() == before {
        return Err(failure(StatusCode::NOT_FOUND, "User not found"));
    }

    Ok(Json(json!({ "message": "User has been deleted" })))
}

async fn change_info(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> HandlerResult {
    let mut state = backend.lock();
    let email = state.authenticate(&headers)?;

    let field = body["field"].as_str().unwrap_or_default().to_string();
    let value = body["value"].as_str().unwrap_or_default().to_string();

    let account = state
        .accounts
        .iter_mut()
        .find(|a| a.email == email)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Account not found"))?;

    match field.as_str() {
        "name" => {
            let mut parts = value.splitn(2, ' ');
            account.first_name = parts.next().unwrap_or_default().to_string();
            account.last_name = parts.next().unwrap_or_default().to_string();
        }
        "username" => account.email = value.clone(),
        "school" => account.school = value.clone(),
        _ => return Err(failure(StatusCode::BAD_REQUEST, "Unknown profile field")),
    }

    // The username is the login identity; issued tokens must follow it
    if field == "username" {
        for mapped in state.tokens.values_mut() {
            if *mapped == email {
                *mapped = value.clone();
            }
        }
    }

    Ok(Json(json!({ "message": "Information updated" })))
}
