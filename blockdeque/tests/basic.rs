use blockdeque::{Deque, Error};

#[test]
fn push_pop_erase_scenario() {
    let mut deque = Deque::default();

    deque.push_back(1).expect("Pushed");
    deque.push_back(2).expect("Pushed");
    deque.push_back(3).expect("Pushed");
    deque.push_front(0).expect("Pushed");

    assert_eq!(vec![0, 1, 2, 3], deque.iter().copied().collect::<Vec<_>>());

    assert_eq!(Some(0), deque.pop_front());

    assert_eq!(vec![1, 2, 3], deque.iter().copied().collect::<Vec<_>>());

    let position = (deque.begin() + 1).position();
    deque.erase(position).expect("Erased");

    assert_eq!(vec![1, 3], deque.iter().copied().collect::<Vec<_>>());
    assert_eq!(2, deque.len());
}

#[test]
fn push_back_across_blocks() {
    let mut deque = Deque::default();

    assert_eq!(1, deque.blocks());

    for i in 0..300 {
        deque.push_back(i).expect("Pushed");
    }

    //  1 -> 2 -> 4 blocks: at least 2 growth events.
    assert!(deque.blocks() >= 4, "{}", deque.blocks());
    assert_eq!(300, deque.len());
    assert_eq!((0..300).collect::<Vec<_>>(), deque.iter().copied().collect::<Vec<_>>());

    for i in 0..300 {
        assert_eq!(i, deque[i]);
    }
}

#[test]
fn push_front_across_blocks() {
    let mut deque = Deque::default();

    for i in 0..300 {
        deque.push_front(i).expect("Pushed");
    }

    assert_eq!((0..300).rev().collect::<Vec<_>>(), deque.iter().copied().collect::<Vec<_>>());
}

#[test]
fn construct_with_value() {
    let deque = Deque::from_elem_in(200, String::from("block"), Default::default()).expect("Allocated");

    assert_eq!(200, deque.len());
    assert!(deque.iter().all(|s| s == "block"));

    let deque: Deque<u8> = Deque::with_len_in(130, Default::default()).expect("Allocated");

    assert_eq!(130, deque.len());
    assert!(deque.iter().all(|b| *b == 0));
}

#[test]
fn checked_access() {
    let deque: Deque<_> = (0..10).collect();

    for index in 0..10 {
        assert_eq!(Ok(&deque[index]), deque.at(index));
    }

    for index in [10, 11, 1000, usize::MAX] {
        assert_eq!(Err(Error::IndexOutOfRange { index, len: 10 }), deque.at(index));
    }
}

#[test]
fn copies_are_independent() {
    let mut original: Deque<String> = (0..150).map(|i| i.to_string()).collect();
    let mut copy = original.clone();

    copy.push_front("front".to_string()).expect("Pushed");
    copy[10].push('!');

    assert_eq!(150, original.len());
    assert_eq!("9", original[9]);

    original.pop_back();
    original[0].clear();

    assert_eq!(151, copy.len());
    assert_eq!("0", copy[1]);
    assert_eq!("9!", copy[10]);
    assert_eq!(Some("149"), copy.back().map(String::as_str));

    let mut assigned = Deque::default();
    assigned.assign_from(&copy).expect("Assigned");

    assert_eq!(copy, assigned);
}

#[test]
fn insert_in_the_middle() {
    let mut deque: Deque<_> = (0..256).collect();

    let position = deque.position(128).expect("In range");
    deque.insert(position, -1).expect("Inserted");

    assert_eq!(257, deque.len());
    assert_eq!(127, deque[127]);
    assert_eq!(-1, deque[128]);
    assert_eq!(128, deque[129]);
    assert_eq!(Some(&255), deque.back());
}

#[test]
fn reverse_iteration() {
    let mut deque: Deque<_> = (0..200).collect();

    for i in 1..=50 {
        deque.push_front(-i).expect("Pushed");
    }

    let reversed: Vec<_> = deque.iter().rev().copied().collect();

    assert_eq!((-50..200).rev().collect::<Vec<_>>(), reversed);

    let owned: Vec<_> = deque.into_iter().rev().take(3).collect();

    assert_eq!(vec![199, 198, 197], owned);
}

#[test]
fn cursor_distance() {
    let mut deque: Deque<_> = (0..300).collect();

    for i in 0..100 {
        deque.push_front(i).expect("Pushed");
    }

    let (begin, end) = (deque.begin(), deque.end());

    assert_eq!(400, end - begin);

    let mut cursor = begin;
    let mut steps = 0;

    while cursor != end {
        assert_eq!(steps, cursor - begin);
        assert_eq!(steps - 400, cursor - end);

        cursor.move_next();
        steps += 1;
    }
}
