//! Front end, analysis and generation across several files

use quadrate::frontend::module::Resolver;
use quadrate::frontend::semantic::{analyze, SymbolKind};
use quadrate::middle::codegen::CGenerator;
use quadrate::util::config::Config;
use quadrate::Compiler;

use crate::common::{project, source};

fn compiler() -> Compiler {
    Compiler::new(Config::default(), Resolver::new(vec![]))
}

#[test]
fn test_import_graph_is_discovered() {
    let dir = project(&[
        ("main.qd", "use shapes\nfn main() {\n\tshapes::area 2 3\n\tprint\n}"),
        (
            "shapes/module.qd",
            "use geometry\nfn area(w, h) {\n\tgeometry::multiply w h\n}",
        ),
        ("shapes/geometry.qd", "fn multiply(a, b) {\n\tpush a b\n\tmul\n}"),
    ]);

    let units = compiler().compile(&[source(&dir, "main.qd")]).unwrap();
    let names: Vec<_> = units.iter().map(|u| u.unit_name()).collect();
    assert_eq!(names, vec!["main", "shapes", "geometry"]);

    let symbols = analyze(&units).unwrap();
    let area = symbols.global("shapes::area").unwrap();
    assert_eq!(area.kind, SymbolKind::Function);
    assert_eq!(area.unit, "shapes");
    assert!(symbols.scoped("geometry::multiply", "b").is_some());
}

#[test]
fn test_generated_files_reference_each_other() {
    let dir = project(&[
        ("main.qd", "use shapes\nfn main() {\n\tshapes::square 4\n\tprint\n}"),
        ("shapes.qd", "const SIDES 4\nfn square(x) {\n\tpush x x\n\tmul\n}"),
    ]);

    let units = compiler().compile(&[source(&dir, "main.qd")]).unwrap();
    let symbols = analyze(&units).unwrap();
    let generator = CGenerator::new(&Config::default());
    let main = generator.generate(&units[0], &symbols).unwrap();
    let shapes = generator.generate(&units[1], &symbols).unwrap();

    assert_eq!(shapes.header_name, "shapes_shapes.h");
    assert!(main.header.contains("#include \"shapes_shapes.h\""));
    assert!(main.source.contains("__qd_shapes_square(1, (__qd_real_t)4);"));
    assert!(shapes.header.contains("extern const __qd_real_t __qd_shapes_SIDES;"));
    assert!(shapes.source.contains("void __qd_shapes_square(int argc, ...) {"));
}

#[test]
fn test_shared_import_is_compiled_once() {
    let dir = project(&[
        ("main.qd", "use a\nuse b\nfn main() {\n\ta::run\n\tb::run\n}"),
        ("a.qd", "use util\nfn run() {\n\tutil::hello\n}"),
        ("b.qd", "use util\nfn run() {\n\tutil::hello\n}"),
        ("util.qd", "fn hello() {\n\tprint \"hello\"\n}"),
    ]);

    let units = compiler().compile(&[source(&dir, "main.qd")]).unwrap();
    assert_eq!(units.len(), 4);
    assert!(analyze(&units).is_ok());
}

#[test]
fn test_search_root_import() {
    let root = project(&[("collections/module.qd", "fn first() {\n}")]);
    let dir = project(&[("main.qd", "use collections\nfn main() {\n\tcollections::first\n}")]);

    let mut compiler = Compiler::new(
        Config::default(),
        Resolver::new(vec![root.path().to_path_buf()]),
    );
    let units = compiler.compile(&[source(&dir, "main.qd")]).unwrap();
    assert_eq!(units[1].module_name.as_deref(), Some("collections"));
    assert!(analyze(&units).is_ok());
}

#[test]
fn test_multiple_seed_files() {
    let dir = project(&[
        ("main.qd", "fn main() {\n\tgreet\n}"),
        ("greet.qd", "fn greet() {\n\tprint \"hi\"\n}"),
    ]);
    let units = compiler()
        .compile(&[source(&dir, "main.qd"), source(&dir, "greet.qd")])
        .unwrap();
    assert!(units.iter().all(|u| u.module_name.is_none()));
    assert!(analyze(&units).is_ok());
}
