use serde::Deserialize;

use crate::platform::{join_caption, local_time_from_epoch_secs, Post, SidecarChild};

/// Posts extracted from one profile response, in feed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFeed {
    pub videos: Vec<Post>,
    pub posts: Vec<Post>,
}

impl ProfileFeed {
    pub fn len(&self) -> usize {
        self.videos.len() + self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<ProfileResponse> for ProfileFeed {
    fn from(response: ProfileResponse) -> Self {
        let user = response.graphql.user;
        Self {
            videos: timeline_posts(user.edge_felix_video_timeline),
            posts: timeline_posts(user.edge_owner_to_timeline_media),
        }
    }
}

fn timeline_posts(timeline: Option<EdgeConnection<GraphNode>>) -> Vec<Post> {
    timeline
        .map(|timeline| timeline.into_nodes().map(Post::from).collect())
        .unwrap_or_default()
}

impl From<GraphNode> for Post {
    fn from(node: GraphNode) -> Self {
        let is_video = node.is_video.unwrap_or(false);
        let media_url = primary_url(is_video, node.video_url, node.display_url);

        let caption = node
            .edge_media_to_caption
            .map(|captions| {
                let fragments = captions.into_nodes().map(|n| n.text.unwrap_or_default());
                join_caption(fragments)
            })
            .unwrap_or_default();

        let sidecar_children = node
            .edge_sidecar_to_children
            .map(|children| children.into_nodes().map(SidecarChild::from).collect())
            .unwrap_or_default();

        Post::new(
            is_video,
            caption,
            local_time_from_epoch_secs(node.taken_at_timestamp.unwrap_or(0)),
            media_url,
            sidecar_children,
        )
    }
}

impl From<GraphChildNode> for SidecarChild {
    fn from(node: GraphChildNode) -> Self {
        let is_video = node.is_video.unwrap_or(false);
        SidecarChild::new(is_video, primary_url(is_video, node.video_url, node.display_url))
    }
}

fn primary_url(is_video: bool, video_url: Option<String>, display_url: Option<String>) -> Option<String> {
    if is_video {
        video_url
    } else {
        display_url
    }
}

// --- Profile response ---

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub graphql: Graph,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Graph {
    pub user: GraphUser,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphUser {
    pub edge_felix_video_timeline: Option<EdgeConnection<GraphNode>>,
    pub edge_owner_to_timeline_media: Option<EdgeConnection<GraphNode>>,
}

/// Any level may be `null` or absent; such edges are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeConnection<T> {
    pub edges: Option<Vec<Option<Edge<T>>>>,
}

impl<T> EdgeConnection<T> {
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|edge| edge.node)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: Option<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphNode {
    pub is_video: Option<bool>,
    pub video_url: Option<String>,
    pub display_url: Option<String>,
    pub edge_sidecar_to_children: Option<EdgeConnection<GraphChildNode>>,
    pub edge_media_to_caption: Option<EdgeConnection<CaptionNode>>,
    pub taken_at_timestamp: Option<i64>,
}

/// Carousel children carry media fields only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphChildNode {
    pub is_video: Option<bool>,
    pub video_url: Option<String>,
    pub display_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptionNode {
    pub text: Option<String>,
}
