#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use parking_lot::Mutex;
use std::sync::Arc;
use wirebox::{ParamSpec, ParamType, Registry, Resettable, Resolver, ServiceContainer, TypeCatalog, TypeSpec};

struct TenantProvider {
    data: Mutex<Vec<u64>>,
}

impl Resettable for TenantProvider {
    fn reset(&self) {
        self.data.lock().clear();
    }
}

struct PlainService;

struct A(Arc<B>);
struct B(Arc<C>);
struct C(Arc<D>);
struct D(Arc<E>);
struct E;

fn reset_registry(total: usize, resettable: usize) -> (ServiceContainer, Resolver) {
    let mut catalog = TypeCatalog::new();
    for index in 0..total {
        if index < resettable {
            catalog.register(TypeSpec::concrete_resettable::<TenantProvider, _>(
                format!("service_{index}"),
                vec![],
                |_| {
                    Ok(TenantProvider {
                        data: Mutex::new(vec![1, 2, 3]),
                    })
                },
            ));
        } else {
            catalog.register(TypeSpec::concrete::<PlainService, _>(format!("service_{index}"), vec![], |_| {
                Ok(PlainService)
            }));
        }
    }

    let registry = Arc::new(Registry::new(Arc::new(catalog)));
    let container = ServiceContainer::new(registry.clone());
    let resolver = Resolver::new(registry);
    for index in 0..total {
        container.add_scoped(&format!("service_{index}"), None).unwrap();
        resolver.get_service(&format!("service_{index}")).unwrap();
    }

    (container, resolver)
}

fn chain_resolver() -> (ServiceContainer, Resolver) {
    fn dep(name: &str) -> Vec<ParamSpec> {
        vec![ParamSpec::new("dep", ParamType::Named(name.into()))]
    }

    let catalog = TypeCatalog::new()
        .with(TypeSpec::concrete::<A, _>("A", dep("B"), |args| {
            Ok(A(args[0].expect_service("A", 0)?))
        }))
        .with(TypeSpec::concrete::<B, _>("B", dep("C"), |args| {
            Ok(B(args[0].expect_service("B", 0)?))
        }))
        .with(TypeSpec::concrete::<C, _>("C", dep("D"), |args| {
            Ok(C(args[0].expect_service("C", 0)?))
        }))
        .with(TypeSpec::concrete::<D, _>("D", dep("E"), |args| {
            Ok(D(args[0].expect_service("D", 0)?))
        }))
        .with(TypeSpec::concrete::<E, _>("E", vec![], |_| Ok(E)));

    let registry = Arc::new(Registry::new(Arc::new(catalog)));
    let container = ServiceContainer::new(registry.clone());
    for name in ["A", "B", "C", "D", "E"] {
        container.add_scoped(name, None).unwrap();
    }

    (container, Resolver::new(registry))
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("reset_all_1000_services_100_resettable", |b| {
        let (container, _) = reset_registry(1000, 100);
        b.iter(|| container.reset_all());
    })
    .bench_function("get_cached_scoped", |b| {
        let (_, resolver) = reset_registry(1, 0);
        b.iter(|| resolver.get_service("service_0").unwrap());
    })
    .bench_function("get_ephemeral_chain", |b| {
        let (container, resolver) = chain_resolver();
        container.registry().remove("A");
        container.add_ephemeral("A", None).unwrap();
        b.iter(|| resolver.get_service("A").unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
