use async_trait::async_trait;
use carousel_forge::{
    CarouselList, ContextChange, Dimensions, DisplayType, EditorConfig, EntryField, ImageProbe,
    derive_banner_id,
};
use proptest::prelude::*;
use proptest::sample::Index;

/// Every URL loads as a 3:1 image.
struct AnyImage;

#[async_trait]
impl ImageProbe for AnyImage {
    async fn verify_image_load(&self, _url: &str) -> bool {
        true
    }

    async fn dimensions(&self, _url: &str) -> anyhow::Result<Dimensions> {
        Ok(Dimensions::new(300, 100))
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add(Option<usize>),
    Remove(Index),
    Move(Index, Index),
    Position(String),
}

#[derive(Debug, Clone)]
struct Setup {
    display_type: DisplayType,
    category: String,
    page_id: String,
    custom_page_id: String,
    position: String,
    priority: Option<i64>,
}

fn setup() -> impl Strategy<Value = Setup> {
    (
        prop_oneof![Just(DisplayType::Carousel), Just(DisplayType::Single)],
        "[a-z]{1,8}",
        prop_oneof![
            Just("Cart".to_string()),
            Just("other".to_string()),
            "[A-Za-z]{1,6}",
        ],
        prop_oneof![Just("other".to_string()), "[A-Za-z][A-Za-z ]{0,7}"],
        "[0-9]{1,3}",
        proptest::option::of(-50i64..50),
    )
        .prop_map(
            |(display_type, category, page_id, custom_page_id, position, priority)| Setup {
                display_type,
                category,
                page_id,
                custom_page_id,
                position,
                priority,
            },
        )
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => proptest::option::of(0..12usize).prop_map(Op::Add),
        1 => any::<Index>().prop_map(Op::Remove),
        1 => (any::<Index>(), any::<Index>()).prop_map(|(from, to)| Op::Move(from, to)),
        1 => "[0-9]{1,3}".prop_map(Op::Position),
    ]
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

/// Build a list from `setup`, replay `ops` and check the banner ids after every step.
async fn replay(setup: &Setup, ops: &[Op]) -> CarouselList<AnyImage> {
    let mut list = CarouselList::new(AnyImage, EditorConfig::default());
    list.apply(ContextChange::DisplayType(setup.display_type)).unwrap();
    list.apply(ContextChange::Category(setup.category.clone())).unwrap();
    list.apply(ContextChange::PageId(setup.page_id.clone())).unwrap();
    list.apply(ContextChange::CustomPageId(setup.custom_page_id.clone())).unwrap();
    list.apply(ContextChange::Position(setup.position.clone())).unwrap();
    list.apply(ContextChange::Priority(setup.priority)).unwrap();

    let mut next_url = 0;
    for op in ops {
        match op {
            Op::Add(index) => {
                next_url += 1;
                list.add(&format!("https://cdn.test/{next_url}.png"), *index)
                    .await
                    .unwrap();
            }
            Op::Remove(index) if !list.is_empty() => {
                list.remove(index.index(list.len())).unwrap();
            }
            Op::Move(from, to) if !list.is_empty() => {
                let len = list.len();
                list.move_entry(from.index(len), to.index(len)).unwrap();
            }
            Op::Position(position) => {
                list.apply(ContextChange::Position(position.clone())).unwrap();
            }
            Op::Remove(_) | Op::Move(..) => {}
        }
        assert_banner_ids_follow_context(&list);
    }
    list
}

fn assert_banner_ids_follow_context(list: &CarouselList<AnyImage>) {
    let ctx = list.context();
    if ctx.display_type == DisplayType::Single {
        assert!(list.len() <= 1, "single banner holds {} images", list.len());
    }
    for (index, entry) in list.entries().iter().enumerate() {
        assert_eq!(entry.banner_id, derive_banner_id(ctx, index));
        if ctx.display_type == DisplayType::Carousel {
            assert!(entry.banner_id.ends_with(&format!("_{index}")));
        }
    }
}

proptest! {
    #[test]
    fn prop_banner_ids_track_index_and_context(
        setup in setup(),
        ops in proptest::collection::vec(op(), 0..24),
    ) {
        block_on(replay(&setup, &ops));
    }

    #[test]
    fn prop_export_import_export_is_stable(
        setup in setup(),
        ops in proptest::collection::vec(op(), 1..16),
    ) {
        let exported = block_on(async {
            let mut list = replay(&setup, &ops).await;
            if list.is_empty() {
                list.add("https://cdn.test/last.png", None).await.unwrap();
            }
            for index in 0..list.len() {
                list.update_field(index, EntryField::Link, format!("https://shop.test/{index}"))
                    .unwrap();
            }
            list.serialize().unwrap()
        });

        let mut fresh = CarouselList::new(AnyImage, EditorConfig::default());
        fresh.deserialize(&exported).unwrap();
        prop_assert_eq!(fresh.serialize().unwrap(), exported);
    }
}
