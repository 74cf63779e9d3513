//! Review rules shared by the forum page, the profile page and moderation.

use payloads::{ForumPost, ModerationStatus, User};

/// Owners can delete their own posts; admins can delete any.
pub fn can_delete(user: Option<&User>, post: &ForumPost) -> bool {
    user.is_some_and(|user| user.role.is_admin() || user.id == post.user_id)
}

/// Mean rating, `None` for no posts.
pub fn average_rating(posts: &[ForumPost]) -> Option<f32> {
    if posts.is_empty() {
        return None;
    }
    let total: u32 = posts.iter().map(|post| post.rating as u32).sum();
    Some(total as f32 / posts.len() as f32)
}

/// Statuses a post can be moved to from its current one.
pub fn transitions(status: ModerationStatus) -> Vec<ModerationStatus> {
    ModerationStatus::ALL
        .into_iter()
        .filter(|next| *next != status)
        .collect()
}

/// Posts on the moderation screen, one tab per status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModerationQueue {
    posts: Vec<ForumPost>,
}

impl ModerationQueue {
    pub fn new(posts: Vec<ForumPost>) -> Self {
        Self { posts }
    }

    pub fn with_status(&self, status: ModerationStatus) -> Vec<&ForumPost> {
        self.posts
            .iter()
            .filter(|post| post.status == status)
            .collect()
    }

    pub fn count(&self, status: ModerationStatus) -> usize {
        self.posts.iter().filter(|post| post.status == status).count()
    }

    /// Replace a post with the server's copy after moderation.
    pub fn apply(&mut self, updated: ForumPost) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == updated.id) {
            *post = updated;
        }
    }

    pub fn remove(&mut self, id: payloads::PostId) {
        self.posts.retain(|post| post.id != id);
    }
}

#[cfg(test)]
mod tests {
    use payloads::{LocationId, PostId, Role, UserId};
    use uuid::Uuid;

    use super::*;

    fn post(status: ModerationStatus, rating: u8, location: u128) -> ForumPost {
        ForumPost {
            id: PostId(Uuid::new_v4()),
            author: "Ana".into(),
            rating,
            body: "Muy bonito".into(),
            image_urls: vec![],
            status,
            user_id: UserId(Uuid::from_u128(1)),
            location_id: LocationId(Uuid::from_u128(location)),
            created_at: "2025-05-01T00:00:00Z".parse().unwrap(),
        }
    }

    fn user(id: u128, role: Role) -> User {
        User {
            id: UserId(Uuid::from_u128(id)),
            name: "Luis".into(),
            email: "luis@example.com".into(),
            role,
        }
    }

    #[test]
    fn delete_rights() {
        let mine = post(ModerationStatus::Pending, 5, 10);
        assert!(!can_delete(None, &mine));
        assert!(can_delete(Some(&user(1, Role::User)), &mine));
        assert!(!can_delete(Some(&user(2, Role::User)), &mine));
        assert!(can_delete(Some(&user(2, Role::Admin)), &mine));
        assert!(can_delete(Some(&user(3, Role::SuperAdmin)), &mine));
    }

    #[test]
    fn average_of_ratings() {
        assert_eq!(average_rating(&[]), None);
        let posts = vec![
            post(ModerationStatus::Approved, 5, 10),
            post(ModerationStatus::Approved, 4, 10),
        ];
        assert_eq!(average_rating(&posts), Some(4.5));
    }

    #[test]
    fn pending_can_go_either_way() {
        assert_eq!(
            transitions(ModerationStatus::Pending),
            vec![ModerationStatus::Approved, ModerationStatus::Rejected]
        );
        assert!(
            !transitions(ModerationStatus::Approved)
                .contains(&ModerationStatus::Approved)
        );
    }

    #[test]
    fn queue_moves_posts_between_tabs() {
        let pending = post(ModerationStatus::Pending, 4, 10);
        let mut queue = ModerationQueue::new(vec![
            pending.clone(),
            post(ModerationStatus::Approved, 5, 10),
        ]);
        assert_eq!(queue.count(ModerationStatus::Pending), 1);

        queue.apply(ForumPost {
            status: ModerationStatus::Approved,
            ..pending.clone()
        });
        assert_eq!(queue.count(ModerationStatus::Pending), 0);
        assert_eq!(queue.with_status(ModerationStatus::Approved).len(), 2);

        queue.remove(pending.id);
        assert_eq!(queue.count(ModerationStatus::Approved), 1);
    }
}
