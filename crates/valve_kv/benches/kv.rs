use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn get_input() -> String {
    let mut text = String::from("\"items_game\"\n{\n\t\"items\"\n\t{\n");
    for id in 0..5_000 {
        text.push_str(&format!(
            "\t\t\"{id}\"\n\t\t{{\n\t\t\t\"name\" \"item_{id}\"\n\t\t\t\"prefab\" \"base\"\n\t\t\t\"attributes\"\n\t\t\t{{\n\t\t\t\t\"value\" \"{id}\"\n\t\t\t}}\n\t\t}}\n"
        ));
    }
    text.push_str("\t}\n}\n");
    text
}

pub mod parse {
    use divan::Bencher;
    use valve_kv::KeyValues;

    #[divan::bench]
    fn from_text(bencher: Bencher) {
        bencher
            .with_inputs(super::get_input)
            .bench_values(|text| divan::black_box(KeyValues::from_text(text).unwrap()));
    }

    #[divan::bench]
    fn find_recursive(bencher: Bencher) {
        let kv = KeyValues::from_text(super::get_input()).unwrap();
        bencher.bench_local(|| divan::black_box(kv.find_recursive("item_4999")));
    }

    #[divan::bench]
    fn write(bencher: Bencher) {
        let kv = KeyValues::from_text(super::get_input()).unwrap();
        bencher.bench_local(|| divan::black_box(kv.to_string()));
    }
}
