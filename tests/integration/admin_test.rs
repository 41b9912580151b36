// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use parking_lot::Mutex;
use scrapebot::application::admin::{check_admin, unset_admin, AdminStore, InMemoryAdminStore};
use scrapebot::domain::models::message::{Conversation, Message};

fn channel(guild_id: &str, admin: bool) -> Conversation {
    Conversation {
        service_id: "discord".to_string(),
        conversation_id: "general".to_string(),
        guild_id: guild_id.to_string(),
        admin,
    }
}

#[test]
fn test_admin_lifecycle_through_closure_sink() {
    let store = InMemoryAdminStore::new();
    let replies = Mutex::new(Vec::new());
    let sink = |_: &Conversation, message: Message| replies.lock().push(message.description);

    store.set_admin(&channel("guild-a", false).guild(), "alice");
    check_admin(&channel("guild-a", false), "alice", &store, &sink);
    check_admin(&channel("guild-b", false), "alice", &store, &sink);

    unset_admin(&channel("guild-a", true), "alice", &store, &sink);
    check_admin(&channel("guild-a", false), "alice", &store, &sink);

    assert_eq!(
        *replies.lock(),
        vec![
            "alice is an admin.".to_string(),
            "alice is not an admin.".to_string(),
            "Admin has been unset.".to_string(),
            "alice is not an admin.".to_string(),
        ]
    );
}
