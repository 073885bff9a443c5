use balance_core::{tasks_for_day, MemoryKeyValueStore, PlannerService, Task};
use chrono::NaiveDate;
use proptest::prelude::*;

fn date(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1 + offset).unwrap()
}

fn hhmm() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| format!("{h:02}:{m:02}"))
}

fn task_strategy() -> impl Strategy<Value = (u32, String, bool)> {
    (0u32..4, hhmm(), any::<bool>())
}

fn build_tasks(seeds: &[(u32, String, bool)]) -> Vec<Task> {
    seeds
        .iter()
        .enumerate()
        .map(|(index, (offset, from, is_work))| Task {
            id: format!("t{index}").into(),
            title: format!("task {index}"),
            date: date(*offset),
            from_time: from.clone(),
            to_time: "24:00".to_string(),
            is_work: *is_work,
        })
        .collect()
}

proptest! {
    #[test]
    fn day_view_keeps_only_that_day_in_start_order(
        seeds in prop::collection::vec(task_strategy(), 0..40),
        selected in 0u32..4,
    ) {
        let tasks = build_tasks(&seeds);
        let view = tasks_for_day(&tasks, date(selected));

        prop_assert!(view.iter().all(|task| task.date == date(selected)));
        prop_assert_eq!(
            view.len(),
            tasks.iter().filter(|task| task.date == date(selected)).count()
        );
        for pair in view.windows(2) {
            prop_assert!(pair[0].from_time <= pair[1].from_time);
            if pair[0].from_time == pair[1].from_time {
                let position = |task: &Task| tasks.iter().position(|t| t.id == task.id);
                prop_assert!(position(&pair[0]) < position(&pair[1]));
            }
        }
    }

    #[test]
    fn valid_add_task_grows_list_by_one_and_echoes_fields(
        title in "[A-Za-z][A-Za-z ]{0,20}",
        from in hhmm(),
        to in hhmm(),
        offset in 0u32..4,
        is_work in any::<bool>(),
    ) {
        prop_assume!(from < to);
        let mut service = PlannerService::load(MemoryKeyValueStore::new(), date(0));
        service.add_task("existing", date(0), "00:00", "00:01", true).unwrap();

        let task = service
            .add_task(title.clone(), date(offset), from.clone(), to.clone(), is_work)
            .unwrap();

        prop_assert_eq!(service.tasks().len(), 2);
        prop_assert_eq!(&task.title, &title);
        prop_assert_eq!(task.date, date(offset));
        prop_assert_eq!(&task.from_time, &from);
        prop_assert_eq!(&task.to_time, &to);
        prop_assert_eq!(task.is_work, is_work);
        prop_assert_ne!(&task.id, &service.tasks()[0].id);
    }

    #[test]
    fn non_increasing_ranges_are_always_rejected(from in hhmm(), to in hhmm()) {
        prop_assume!(from >= to);
        let mut service = PlannerService::load(MemoryKeyValueStore::new(), date(0));
        prop_assert!(service.add_task("x", date(0), from, to, true).is_err());
        prop_assert!(service.tasks().is_empty());
    }
}
