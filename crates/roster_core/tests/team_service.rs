use roster_core::db::open_shared_db_in_memory;
use roster_core::{
    RepoError, RepoResult, ServiceError, SqliteTeamRepository, Team, TeamDraft, TeamId,
    TeamRepository, TeamService,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

fn service() -> TeamService<SqliteTeamRepository> {
    let repo = SqliteTeamRepository::try_new(open_shared_db_in_memory().unwrap()).unwrap();
    TeamService::try_new(repo).unwrap()
}

fn team(name: &str, sport: &str, location: &str, founded_year: Option<i32>) -> TeamDraft {
    TeamDraft {
        founded_year,
        ..TeamDraft::new(name, sport, "Coach", location)
    }
}

fn names(teams: &[Team]) -> Vec<&str> {
    teams.iter().map(|team| team.name.as_str()).collect()
}

#[test]
fn create_then_get_returns_equal_entity_with_new_id() {
    let service = service();
    let draft = TeamDraft {
        founded_year: Some(2010),
        ..TeamDraft::new("Nova FC", "Football", "A. Ray", "Porto")
    };

    let created = service.create(&draft).unwrap();
    assert_eq!(created.id, 1);

    let fetched = service.get_by_id(created.id).unwrap();
    assert_eq!(fetched.to_draft(), draft);
    assert_eq!(service.list_all(), vec![fetched]);
}

#[test]
fn invalid_create_reports_every_rule_and_persists_nothing() {
    let service = service();
    let draft = TeamDraft::new(" ", "", "", "Porto");

    let err = service.create(&draft).unwrap_err();
    match &err {
        ServiceError::Validation { entity, errors } => {
            assert_eq!(*entity, "Team");
            assert_eq!(
                errors,
                &vec![
                    "Team name is required".to_string(),
                    "Sport is required".to_string(),
                    "Coach name is required".to_string(),
                ]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.count().unwrap(), 0);
    assert!(service.list_all().is_empty());
}

#[test]
fn get_by_id_reads_storage_and_reports_missing() {
    let service = service();
    let err = service.get_by_id(77).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Team", id: 77 }));
}

#[test]
fn update_requires_identifier_then_existence() {
    let service = service();
    let mut created = service.create(&team("Nova FC", "Football", "Porto", None)).unwrap();

    let mut unsaved = created.clone();
    unsaved.id = 0;
    let err = service.update(&unsaved).unwrap_err();
    assert_eq!(err.validation_errors(), ["identifier required".to_string()]);

    let before = service.list_all();
    let mut ghost = created.clone();
    ghost.id = 999;
    let err = service.update(&ghost).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Team", id: 999 }));
    assert_eq!(service.list_all(), before);

    created.location = "Braga".to_string();
    let updated = service.update(&created).unwrap();
    assert_eq!(updated.location, "Braga");
    assert_eq!(service.list_all()[0].location, "Braga");
}

#[test]
fn update_revalidates_full_entity() {
    let service = service();
    let mut created = service.create(&team("Nova FC", "Football", "Porto", None)).unwrap();
    created.coach = "   ".to_string();

    let err = service.update(&created).unwrap_err();
    assert_eq!(err.validation_errors(), ["Coach name is required".to_string()]);
    assert_eq!(service.get_by_id(created.id).unwrap().coach, "Coach");
}

#[test]
fn delete_refreshes_cache_and_reports_missing() {
    let service = service();
    let created = service.create(&team("Nova FC", "Football", "Porto", None)).unwrap();

    service.delete(created.id).unwrap();
    assert!(service.list_all().is_empty());

    let err = service.delete(created.id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Team", .. }));
}

#[test]
fn list_all_returns_independent_copy() {
    let service = service();
    service.create(&team("Nova FC", "Football", "Porto", None)).unwrap();

    let mut copy = service.list_all();
    copy[0].name = "Changed".to_string();
    copy.clear();
    assert_eq!(names(&service.list_all()), vec!["Nova FC"]);
}

#[test]
fn filter_with_always_true_matches_list_all() {
    let service = service();
    for name in ["Charlie", "Alpha", "Bravo"] {
        service.create(&team(name, "Football", "Porto", None)).unwrap();
    }

    let all: HashSet<_> = service.list_all().into_iter().map(|t| t.id).collect();
    let filtered: HashSet<_> = service.filter_by(|_| true).into_iter().map(|t| t.id).collect();
    assert_eq!(all, filtered);
    assert_eq!(names(&service.filter_by(|t| t.name.starts_with('B'))), vec!["Bravo"]);
}

#[test]
fn sort_by_name_descending_is_exact_reverse() {
    let service = service();
    for name in ["delta", "Alpha", "charlie", "Bravo"] {
        service.create(&team(name, "Football", "Porto", None)).unwrap();
    }

    let asc = service.sort_by("name", true);
    let mut desc = service.sort_by("NAME", false);
    assert_eq!(names(&asc), vec!["Alpha", "Bravo", "charlie", "delta"]);
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn sort_by_unknown_key_falls_back_to_id_and_years_put_unset_first() {
    let service = service();
    service.create(&team("B", "Football", "Porto", Some(1990))).unwrap();
    service.create(&team("A", "Football", "Porto", None)).unwrap();
    service.create(&team("C", "Football", "Porto", Some(1900))).unwrap();

    let by_id: Vec<TeamId> = service.sort_by("budget", true).iter().map(|t| t.id).collect();
    assert_eq!(by_id, vec![1, 2, 3]);
    assert_eq!(names(&service.sort_by("foundedYear", true)), vec!["A", "C", "B"]);
}

#[test]
fn sport_and_location_views_ignore_case() {
    let service = service();
    service.create(&team("Dragons", "Football", "Porto Norte", None)).unwrap();
    service.create(&team("Lions", "football", "Lisbon", None)).unwrap();
    service.create(&team("Hoops", "Basketball", "porto", None)).unwrap();

    assert_eq!(names(&service.teams_by_sport("FOOTBALL")), vec!["Dragons", "Lions"]);
    assert_eq!(names(&service.teams_by_location("PORTO")), vec!["Dragons", "Hoops"]);
    assert!(service.teams_by_sport("foot").is_empty());
}

#[test]
fn statistics_reflect_current_snapshot() {
    let service = service();
    service.create(&team("Nova FC", "Football", "Porto", Some(2010))).unwrap();
    service.create(&team("Old Boys", "Football", "Lisbon", Some(1900))).unwrap();
    service.create(&team("Hoops", "Basketball", "Porto", None)).unwrap();

    let stats = service.statistics();
    assert_eq!(stats.total_teams, 3);
    assert_eq!(stats.teams_by_sport["Football"], 2);
    assert_eq!(stats.teams_by_location["Porto"], 2);
    assert_eq!(stats.average_founded_year, 1955.0);
    assert_eq!(stats.oldest_team.as_deref(), Some("Old Boys"));

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["totalTeams"], 3);
    assert_eq!(json["oldestTeam"], "Old Boys");
}

/// Delegates to SQLite but can be told to fail writes or reads.
struct FlakyTeams {
    inner: SqliteTeamRepository,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl FlakyTeams {
    fn write_guard(&self) -> RepoResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepoError::InvalidData("write rejected".to_string()));
        }
        Ok(())
    }

    fn read_guard(&self) -> RepoResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepoError::InvalidData("read rejected".to_string()));
        }
        Ok(())
    }
}

impl TeamRepository for FlakyTeams {
    fn save(&self, draft: &TeamDraft) -> RepoResult<Team> {
        self.write_guard()?;
        self.inner.save(draft)
    }
    fn find_by_id(&self, id: TeamId) -> RepoResult<Option<Team>> {
        self.inner.find_by_id(id)
    }
    fn find_all(&self) -> RepoResult<Vec<Team>> {
        self.read_guard()?;
        self.inner.find_all()
    }
    fn update(&self, team: &Team) -> RepoResult<Team> {
        self.write_guard()?;
        self.inner.update(team)
    }
    fn delete_by_id(&self, id: TeamId) -> RepoResult<bool> {
        self.write_guard()?;
        self.inner.delete_by_id(id)
    }
    fn exists_by_id(&self, id: TeamId) -> RepoResult<bool> {
        self.inner.exists_by_id(id)
    }
    fn count(&self) -> RepoResult<u64> {
        self.inner.count()
    }
    fn find_by_sport(&self, sport: &str) -> RepoResult<Vec<Team>> {
        self.inner.find_by_sport(sport)
    }
    fn find_by_location(&self, location: &str) -> RepoResult<Vec<Team>> {
        self.inner.find_by_location(location)
    }
    fn find_by_coach(&self, coach: &str) -> RepoResult<Vec<Team>> {
        self.inner.find_by_coach(coach)
    }
    fn search_by_name(&self, name_part: &str) -> RepoResult<Vec<Team>> {
        self.inner.search_by_name(name_part)
    }
}

fn flaky_service() -> TeamService<FlakyTeams> {
    let inner = SqliteTeamRepository::try_new(open_shared_db_in_memory().unwrap()).unwrap();
    TeamService::try_new(FlakyTeams {
        inner,
        fail_writes: AtomicBool::new(false),
        fail_reads: AtomicBool::new(false),
    })
    .unwrap()
}

#[test]
fn storage_failure_propagates_and_keeps_cache() {
    let service = flaky_service();
    let created = service.create(&team("Nova FC", "Football", "Porto", None)).unwrap();

    service.repository().fail_writes.store(true, Ordering::SeqCst);
    let err = service.create(&team("Lions", "Football", "Lisbon", None)).unwrap_err();
    assert!(matches!(err, ServiceError::Storage(RepoError::InvalidData(_))));

    let err = service.delete(created.id).unwrap_err();
    assert!(matches!(err, ServiceError::Storage(_)));
    assert_eq!(names(&service.list_all()), vec!["Nova FC"]);
}

#[test]
fn failed_refresh_surfaces_storage_error_and_keeps_previous_snapshot() {
    let service = flaky_service();
    service.create(&team("Nova FC", "Football", "Porto", None)).unwrap();

    service.repository().fail_reads.store(true, Ordering::SeqCst);
    let err = service.create(&team("Lions", "Football", "Lisbon", None)).unwrap_err();
    assert!(matches!(err, ServiceError::Storage(_)));
    assert_eq!(names(&service.list_all()), vec!["Nova FC"]);
    assert_eq!(service.count().unwrap(), 2);
}
