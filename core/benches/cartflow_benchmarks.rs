use cartflow::{CartflowError, Pipeline, PipelineControl, Registry, SkipCondition};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
struct BenchContext {
  counter: u64,
  warnings: Vec<String>,
  skip_odd: bool,
}

fn build_pipeline(num_steps: usize, warn_every: usize) -> Pipeline<BenchContext, CartflowError> {
  // Step names must outlive the pipeline definition slice.
  let names: Vec<&'static str> = (0..num_steps)
    .map(|i| &*Box::leak(format!("rule_{}", i).into_boxed_str()))
    .collect();
  let defs: Vec<(&str, bool, Option<SkipCondition<BenchContext>>)> = names
    .iter()
    .enumerate()
    .map(|(i, name)| {
      let skip: Option<SkipCondition<BenchContext>> = if i % 2 == 1 {
        Some(Arc::new(|ctx: &BenchContext| ctx.skip_odd))
      } else {
        None
      };
      (*name, false, skip)
    })
    .collect();

  let mut pipeline = Pipeline::new(&defs);
  for (i, name) in names.iter().enumerate() {
    pipeline.on_root(name, move |ctx: &mut BenchContext| {
      ctx.counter = ctx.counter.wrapping_add(1);
      if warn_every > 0 && i % warn_every == 0 {
        ctx.warnings.push(format!("rule {} flagged", i));
      }
      Ok::<_, CartflowError>(PipelineControl::Continue)
    });
  }
  pipeline
}

fn bench_rule_pipeline(c: &mut Criterion) {
  let mut group = c.benchmark_group("RulePipeline");
  for num_steps in [1usize, 5, 10, 25] {
    let pipeline = build_pipeline(num_steps, 3);
    group.bench_with_input(BenchmarkId::new("all_steps", num_steps), &num_steps, |b, _| {
      b.iter(|| {
        let mut ctx = BenchContext::default();
        pipeline.run(black_box(&mut ctx)).ok();
        black_box(ctx.warnings.len())
      })
    });
    group.bench_with_input(BenchmarkId::new("odd_steps_skipped", num_steps), &num_steps, |b, _| {
      b.iter(|| {
        let mut ctx = BenchContext {
          skip_odd: true,
          ..Default::default()
        };
        pipeline.run(black_box(&mut ctx)).ok();
        black_box(ctx.counter)
      })
    });
  }
  group.finish();
}

fn bench_registry_dispatch(c: &mut Criterion) {
  let registry: Registry = Registry::new();
  registry.register_pipeline(build_pipeline(5, 0));
  c.bench_function("registry_dispatch_5_steps", |b| {
    b.iter(|| {
      let mut ctx = BenchContext::default();
      registry.run(black_box(&mut ctx)).ok();
      black_box(ctx.counter)
    })
  });
}

criterion_group!(benches, bench_rule_pipeline, bench_registry_dispatch);
criterion_main!(benches);
