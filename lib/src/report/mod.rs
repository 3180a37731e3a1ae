//! Code called from the instrumented method: explain a skill roll to the player making it

/// Skill whose roll is being reported
pub trait SkillSubject {
    fn name(&self) -> &str;
}

/// Connection of a logged-in player
pub trait Session {
    fn send_normal_message(&self, message: &str);
}

/// Lookup of live sessions by player id
pub trait SessionDirectory {
    fn session(&self, id: i64) -> Option<&dyn Session>;
}

/// Shape of the gaussian a skill check rolls against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollStatistics {
    pub slide: f64,
    pub w: f64,
    pub mean: f64,
}

impl RollStatistics {
    pub fn new(skill_level: f64, difficulty: f64) -> RollStatistics {
        let cubes = skill_level * skill_level * skill_level - difficulty * difficulty * difficulty;
        let slide = cubes / 50000.0 + (skill_level - difficulty);
        let w = 30.0 - (skill_level - difficulty).abs() / 4.0;
        let mean = (w + slide.abs() / 6.0) + slide;
        RollStatistics { slide, w, mean }
    }
}

/// Message describing one roll
pub fn skill_information_message(
    skill_name: &str,
    bonus: f64,
    skill_level: f64,
    difficulty: f64,
    power: f64,
) -> String {
    let stats = RollStatistics::new(skill_level, difficulty);
    format!(
        "{}, bonus:{:.3}, skill:{:.3}, difficulty: {:.3}; gaussian mean: {:.3}; roll: {:.3}",
        skill_name, bonus, skill_level, difficulty, stats.mean, power
    )
}

/// Send the roll details to the performer, if they are online
///
/// Delivery is best effort: without a skill or a session this does nothing.
pub fn print_skill_information(
    directory: &dyn SessionDirectory,
    skill: Option<&dyn SkillSubject>,
    performer_id: i64,
    bonus: f64,
    skill_level: f64,
    difficulty: f64,
    power: f64,
) {
    let skill = match skill {
        Some(skill) => skill,
        None => return,
    };
    let session = match directory.session(performer_id) {
        Some(session) => session,
        None => {
            log::trace!("no session for {}", performer_id);
            return;
        }
    };
    let message = skill_information_message(skill.name(), bonus, skill_level, difficulty, power);
    session.send_normal_message(&message);
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct Named(&'static str);

    impl SkillSubject for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[derive(Default)]
    struct Inbox(RefCell<Vec<String>>);

    impl Session for Inbox {
        fn send_normal_message(&self, message: &str) {
            self.0.borrow_mut().push(String::from(message));
        }
    }

    #[derive(Default)]
    struct Players(HashMap<i64, Inbox>);

    impl SessionDirectory for Players {
        fn session(&self, id: i64) -> Option<&dyn Session> {
            self.0.get(&id).map(|inbox| inbox as &dyn Session)
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn statistics() {
        let stats = RollStatistics::new(50.0, 40.0);
        assert!(close(stats.slide, 11.22));
        assert!(close(stats.w, 27.5));
        assert!(close(stats.mean, 27.5 + 11.22 / 6.0 + 11.22));

        // Below the difficulty, the slide is negative but still widens the mean
        let stats = RollStatistics::new(10.0, 30.0);
        assert!(close(stats.slide, (1000.0 - 27000.0) / 50000.0 - 20.0));
        assert!(close(stats.w, 25.0));
        assert!(close(stats.mean, 25.0 + stats.slide.abs() / 6.0 + stats.slide));
    }

    #[test]
    fn message_to_online_player() {
        let mut players = Players::default();
        players.0.insert(7, Inbox::default());
        print_skill_information(&players, Some(&Named("Mining")), 7, 1.0, 50.0, 40.0, 0.73);
        assert_eq!(
            *players.0[&7].0.borrow(),
            vec![String::from(
                "Mining, bonus:1.000, skill:50.000, difficulty: 40.000; gaussian mean: 40.590; \
                 roll: 0.730"
            )]
        );
    }

    #[test]
    fn nobody_to_tell() {
        let mut players = Players::default();
        players.0.insert(7, Inbox::default());
        print_skill_information(&players, Some(&Named("Mining")), 8, 1.0, 50.0, 40.0, 0.73);
        print_skill_information(&players, None, 7, 1.0, 50.0, 40.0, 0.73);
        assert!(players.0[&7].0.borrow().is_empty());
    }
}
