//! Property tests for the view pipeline stages.

use mes_domain::{FieldValue, Record};
use mes_pipeline::{apply_filters, compare_values, paginate, sort_records, summarize, windowed_page_numbers, Filter, FilterSpec, MetricFields, SortDirection,
                   SortSpec};
use proptest::prelude::*;

fn arb_qty() -> impl Strategy<Value = FieldValue> {
  prop_oneof![
    (0i64..500).prop_map(FieldValue::from),
    (-100.0f64..100.0).prop_map(FieldValue::from),
    (-50i64..50, 0u32..100).prop_map(|(i, f)| FieldValue::from(format!("{}.{:02}", i, f))),
    "[0-9]{1,3}".prop_map(FieldValue::from),
    "[a-zA-Z가-힣]{0,3}[0-9]{0,2}".prop_map(FieldValue::from),
    Just(FieldValue::Null),
  ]
}

fn arb_record() -> impl Strategy<Value = Record> {
  (0u32..1000,
   prop::option::of("[A-Za-z]{1,3}-[0-9]{1,3}"),
   prop::option::of("[a-z가-힣]{0,4}"),
   prop::option::of((arb_qty(), 0i64..500)),
   prop::option::of((1u32..28, 0u32..24)))
    .prop_map(|(id, machine, worker, qty, day)| {
      let mut r = Record::new().with("id", id as i64);
      if let Some(m) = machine {
        r = r.with("machineName", m);
      }
      if let Some(w) = worker {
        r = r.with("workerName", w);
      }
      if let Some((q, p)) = qty {
        // qty puede mezclar números y texto en la misma columna
        r = r.with("qty", q).with("prod", p).with("ok", p / 2);
      }
      if let Some((d, h)) = day {
        r = r.with("workDate", format!("2024-02-{:02}T{:02}:00:00", d, h));
      }
      r
    })
}

fn arb_filter() -> impl Strategy<Value = Filter> {
  let fields = vec!["machineName".to_string(), "workerName".to_string()];
  prop_oneof![
    "[a-cA-C0-9 ]{0,2}".prop_map(move |q| Filter::keyword(&q, &fields)),
    prop::option::of("[A-C]-[0-9]").prop_map(|v| Filter::exact("machineName", v.as_deref().unwrap_or("all"))),
    (1u32..28, 0u32..10).prop_map(|(d, span)| {
      let start = format!("2024-02-{:02}", d);
      let end = format!("2024-02-{:02}", (d + span).min(28));
      Filter::date_range("workDate", Some(&start), Some(&end))
    }),
  ]
}

fn arb_sort_key() -> impl Strategy<Value = &'static str> {
  prop_oneof![Just("qty"), Just("machineName"), Just("workerName"), Just("id")]
}

proptest! {
  #[test]
  fn filter_is_order_preserving_subset(records in prop::collection::vec(arb_record(), 0..60),
                                       filters in prop::collection::vec(arb_filter(), 0..3)) {
    let spec = FilterSpec { filters };
    let out = apply_filters(&records, &spec);
    // cada salida es un registro de la entrada, en posiciones crecientes
    let mut last: Option<usize> = None;
    for r in &out {
      let pos = records.iter().position(|x| std::ptr::eq(x, *r)).expect("output must come from input");
      prop_assert!(last.map_or(true, |l| pos > l));
      last = Some(pos);
    }
  }

  #[test]
  fn blank_keyword_is_identity(records in prop::collection::vec(arb_record(), 0..40), blank in "[ \t]{0,3}") {
    let fields = vec!["machineName".to_string(), "workerName".to_string()];
    let spec = FilterSpec::new().with(Filter::keyword(&blank, &fields));
    let out = apply_filters(&records, &spec);
    prop_assert_eq!(out, records.iter().collect::<Vec<_>>());
  }

  #[test]
  fn sort_is_idempotent_and_keeps_everything(records in prop::collection::vec(arb_record(), 0..60),
                                             key in arb_sort_key(),
                                             desc in any::<bool>()) {
    let dir = if desc { SortDirection::Desc } else { SortDirection::Asc };
    let spec = SortSpec::by(key, dir);
    let once = sort_records(records.iter().collect(), &spec);
    let twice = sort_records(once.clone(), &spec);
    prop_assert_eq!(&once, &twice);
    prop_assert_eq!(once.len(), records.len());
    for pair in once.windows(2) {
      let (a, b) = (pair[0].get(key), pair[1].get(key));
      let ord = if desc { compare_values(b, a) } else { compare_values(a, b) };
      prop_assert_ne!(ord, std::cmp::Ordering::Greater);
    }
  }

  #[test]
  fn total_pages_is_ceiling_and_window_contains_current(total in 0usize..5000, size in 1usize..100, window in 1usize..15, pick in 0usize..1000) {
    let w = paginate(total, size, 1);
    prop_assert_eq!(w.total_pages, (total + size - 1) / size);
    if w.total_pages > 0 {
      let current = pick % w.total_pages + 1;
      let nums = windowed_page_numbers(current, w.total_pages, window);
      prop_assert!(nums.contains(&current));
      prop_assert!(nums.len() <= window);
      prop_assert!(nums.iter().all(|p| *p >= 1 && *p <= w.total_pages));
    }
  }

  #[test]
  fn pages_partition_the_sequence(total in 0usize..300, size in 1usize..40) {
    let pages = paginate(total, size, 1).total_pages;
    let mut covered = 0;
    for p in 1..=pages {
      let w = paginate(total, size, p);
      prop_assert_eq!(w.start_index, covered);
      covered = w.end_index;
    }
    prop_assert_eq!(covered, total);
  }

  #[test]
  fn summary_only_sees_filtered_records(records in prop::collection::vec(arb_record(), 0..60), filter in arb_filter()) {
    let spec = FilterSpec::new().with(filter);
    let filtered = apply_filters(&records, &spec);
    let s = summarize(filtered.iter().copied(), &MetricFields::default());
    let expected: f64 = filtered.iter().map(|r| r.number("prod")).sum();
    prop_assert_eq!(s.produced, expected);
    prop_assert!(s.yield_rate.is_finite());
  }
}
