// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashSet;
use tracing::info;

use crate::application::sink::MessageSink;
use crate::domain::models::message::{Conversation, Guild, Message};

/// 管理员权限存储
pub trait AdminStore: Send + Sync {
    fn is_admin(&self, guild: &Guild, user_id: &str) -> bool;
    fn set_admin(&self, guild: &Guild, user_id: &str);
    fn unset_admin(&self, guild: &Guild, user_id: &str);
}

/// 内存管理员存储
#[derive(Default)]
pub struct InMemoryAdminStore {
    admins: DashSet<(Guild, String)>,
}

impl InMemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdminStore for InMemoryAdminStore {
    fn is_admin(&self, guild: &Guild, user_id: &str) -> bool {
        self.admins.contains(&(guild.clone(), user_id.to_string()))
    }

    fn set_admin(&self, guild: &Guild, user_id: &str) {
        self.admins.insert((guild.clone(), user_id.to_string()));
    }

    fn unset_admin(&self, guild: &Guild, user_id: &str) {
        self.admins.remove(&(guild.clone(), user_id.to_string()));
    }
}

/// 回复用户在当前服务器中是否为管理员
pub fn check_admin(
    sender: &Conversation,
    user_id: &str,
    store: &dyn AdminStore,
    sink: &dyn MessageSink,
) {
    let reply = if store.is_admin(&sender.guild(), user_id) {
        format!("{} is an admin.", user_id)
    } else {
        format!("{} is not an admin.", user_id)
    };
    sink.send(sender, Message::text(reply));
}

/// 取消用户的管理员身份
///
/// 只有发送者本身是管理员时才生效，否则不做任何回复
pub fn unset_admin(
    sender: &Conversation,
    user_id: &str,
    store: &dyn AdminStore,
    sink: &dyn MessageSink,
) {
    if !sender.admin {
        return;
    }

    store.unset_admin(&sender.guild(), user_id);
    info!(guild = %sender.guild_id, user = user_id, "Admin unset");
    sink.send(sender, Message::text("Admin has been unset."));
}
