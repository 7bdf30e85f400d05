//! This bench test loads a large synthetic scene and builds its hierarchy.

#![allow(missing_docs)]

use std::{fmt::Write as _, io::Write as _};

use criterion::{Criterion, criterion_group, criterion_main};
use mascii::Scene;
use tempfile::NamedTempFile;

/// Writes a scene of `groups` transform hierarchies, each holding a mesh with
/// a handful of attribute lines, followed by one connection per mesh.
fn synthetic_scene(groups: usize) -> NamedTempFile {
    let mut content = String::from("//Maya ASCII 2018ff09 scene\nrequires maya \"2018ff09\";\n");
    for i in 0..groups {
        writeln!(content, "createNode transform -n \"group{i}\";").unwrap();
        writeln!(content, "createNode transform -n \"pCube{i}\" -p \"group{i}\";").unwrap();
        writeln!(
            content,
            "createNode mesh -n \"pCubeShape{i}\" -p \"|group{i}|pCube{i}\";"
        )
        .unwrap();
        content.push_str("\tsetAttr -k off \".v\";\n\tsetAttr \".vir\" yes;\n");
        content.push_str("\tsetAttr -s 8 \".vt[0:7]\"  -0.5 -0.5 0.5 0.5 -0.5 0.5 -0.5 0.5 0.5 0.5 0.5 0.5\n");
        content.push_str("\t\t -0.5 0.5 -0.5 0.5 0.5 -0.5 -0.5 -0.5 -0.5 0.5 -0.5 -0.5;\n");
    }
    for i in 0..groups {
        writeln!(
            content,
            "connectAttr \"pCubeShape{i}.iog\" \":initialShadingGroup.dsm\" -na;"
        )
        .unwrap();
    }

    let mut file = tempfile::Builder::new().suffix(".ma").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn load_scene(c: &mut Criterion) {
    let file = synthetic_scene(10_000);
    let scene = Scene::open(file.path()).unwrap();

    c.bench_function("load scene", |b| {
        b.iter(|| scene.load(&mut ()).unwrap());
    });

    let records = scene.load(&mut ()).unwrap();
    c.bench_function("build hierarchy", |b| {
        b.iter(|| Scene::build(&records, &mut ()).unwrap());
    });
}

criterion_group!(benches, load_scene);
criterion_main!(benches);
