//! Escalating permission checks over the fixed level hierarchy.

use crate::domain::entities::{AppOwner, Inbound};

/// Ordered permission hierarchy.
///
/// Used both as the required threshold on a command and as the starting point
/// of the escalation walk: an invoker satisfying a senior level passes every
/// check requested at a junior one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PermissionLevel {
    Everyone,
    ServerMod,
    ServerAdmin,
    ServerOwner,
    BotOwner,
    Nobody,
}

/// Check `level` against the invoker of `msg`.
///
/// Requires a guild, a resolved invoker membership and the bot's own
/// membership; absence of any is a denial regardless of level. Each failed
/// concrete check escalates to the next more senior level, so the walk is
/// iterative over the fixed hierarchy rather than recursive.
pub fn check_permission(owner: &AppOwner, msg: &Inbound, level: PermissionLevel) -> bool {
    let Some(guild) = msg.guild.as_ref() else {
        return false;
    };
    if guild.bot_member.is_none() {
        return false;
    }
    let Some(member) = guild.member.as_ref() else {
        return false;
    };

    let mut level = level;
    loop {
        match level {
            PermissionLevel::Everyone => return true,
            PermissionLevel::ServerMod if member.can_kick_members => return true,
            PermissionLevel::ServerAdmin if member.is_administrator => return true,
            PermissionLevel::ServerOwner if msg.author.id == guild.owner_id => return true,
            PermissionLevel::BotOwner => return owner.includes(&msg.author.id),
            PermissionLevel::Nobody => return false,
            _ => {}
        }
        level = match level {
            PermissionLevel::ServerMod => PermissionLevel::ServerAdmin,
            PermissionLevel::ServerAdmin => PermissionLevel::ServerOwner,
            _ => PermissionLevel::BotOwner,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Author, BotMember, CapabilitySet, GuildContext, Member};

    fn guild_message(author_id: &str, member: Option<Member>) -> Inbound {
        Inbound::new(
            "chan",
            Author::new(author_id, format!("{}#0001", author_id)),
            "!x",
        )
        .with_guild(GuildContext {
            id: "guild".to_string(),
            owner_id: "owner".to_string(),
            member,
            bot_member: Some(BotMember {
                capabilities: CapabilitySet::all(),
            }),
        })
    }

    fn single_owner() -> AppOwner {
        AppOwner::User("boss".to_string())
    }

    #[test]
    fn everyone_passes_in_any_guild() {
        let msg = guild_message("user", Some(Member::default()));
        assert!(check_permission(
            &single_owner(),
            &msg,
            PermissionLevel::Everyone
        ));
    }

    #[test]
    fn plain_member_fails_mod_and_above() {
        let msg = guild_message("user", Some(Member::default()));
        let owner = single_owner();
        assert!(!check_permission(&owner, &msg, PermissionLevel::ServerMod));
        assert!(!check_permission(&owner, &msg, PermissionLevel::ServerAdmin));
        assert!(!check_permission(&owner, &msg, PermissionLevel::ServerOwner));
        assert!(!check_permission(&owner, &msg, PermissionLevel::BotOwner));
    }

    #[test]
    fn kick_capability_satisfies_mod_only() {
        let msg = guild_message(
            "user",
            Some(Member {
                can_kick_members: true,
                is_administrator: false,
            }),
        );
        let owner = single_owner();
        assert!(check_permission(&owner, &msg, PermissionLevel::ServerMod));
        assert!(!check_permission(&owner, &msg, PermissionLevel::ServerAdmin));
    }

    #[test]
    fn administrator_satisfies_mod_and_admin() {
        let msg = guild_message(
            "user",
            Some(Member {
                can_kick_members: false,
                is_administrator: true,
            }),
        );
        let owner = single_owner();
        assert!(check_permission(&owner, &msg, PermissionLevel::ServerMod));
        assert!(check_permission(&owner, &msg, PermissionLevel::ServerAdmin));
        assert!(!check_permission(&owner, &msg, PermissionLevel::ServerOwner));
    }

    #[test]
    fn guild_owner_satisfies_everything_below_bot_owner() {
        let msg = guild_message("owner", Some(Member::default()));
        let owner = single_owner();
        assert!(check_permission(&owner, &msg, PermissionLevel::ServerMod));
        assert!(check_permission(&owner, &msg, PermissionLevel::ServerAdmin));
        assert!(check_permission(&owner, &msg, PermissionLevel::ServerOwner));
        assert!(!check_permission(&owner, &msg, PermissionLevel::BotOwner));
    }

    #[test]
    fn bot_owner_satisfies_every_level() {
        let msg = guild_message("boss", Some(Member::default()));
        let owner = single_owner();
        assert!(check_permission(&owner, &msg, PermissionLevel::Everyone));
        assert!(check_permission(&owner, &msg, PermissionLevel::ServerMod));
        assert!(check_permission(&owner, &msg, PermissionLevel::ServerAdmin));
        assert!(check_permission(&owner, &msg, PermissionLevel::ServerOwner));
        assert!(check_permission(&owner, &msg, PermissionLevel::BotOwner));
    }

    #[test]
    fn team_membership_counts_as_owner() {
        let owner = AppOwner::Team(vec!["a".to_string(), "boss".to_string()]);
        let msg = guild_message("boss", Some(Member::default()));
        assert!(check_permission(&owner, &msg, PermissionLevel::BotOwner));

        let outsider = guild_message("user", Some(Member::default()));
        assert!(!check_permission(&owner, &outsider, PermissionLevel::BotOwner));
    }

    #[test]
    fn nobody_denies_even_the_owner() {
        let msg = guild_message("boss", Some(Member::default()));
        assert!(!check_permission(
            &single_owner(),
            &msg,
            PermissionLevel::Nobody
        ));
    }

    #[test]
    fn missing_context_denies_at_every_level() {
        let owner = single_owner();

        let dm = Inbound::new("chan", Author::new("boss", "boss#0001"), "!x");
        assert!(!check_permission(&owner, &dm, PermissionLevel::Everyone));

        let no_member = guild_message("boss", None);
        assert!(!check_permission(&owner, &no_member, PermissionLevel::Everyone));

        let mut no_bot = guild_message("boss", Some(Member::default()));
        if let Some(guild) = no_bot.guild.as_mut() {
            guild.bot_member = None;
        }
        assert!(!check_permission(&owner, &no_bot, PermissionLevel::Everyone));
    }
}
