/*!

This is the long-form manual for `objection_tally` and `fostats`.

## Input pages

Three kinds of pages are read. They are expected to be already downloaded: this
crate does not access the network.

### The ballot index

The list of all the questionnaires of the Advisory Committee. Each ballot is a
link to its results, with the description in the title attribute:

```text
<a href='12345/results' title='Call for Review: Foo Working Group Charter'>...</a>
```

Only the ballots whose description contains `call for review` followed by
`charter` or `recommendation` (in any case) are considered.

### The roster

The list of the member organizations and of their representatives. A
representative is attached to the closest organization heading above it:

```text
<h2>Acme Corp - Member since 2001</h2>
...
<h3 class="h5 card-title">
  Jane Doe
</h3>
```

The text after ` - ` in a heading is dropped. Some representatives voted in
the past under a name that is not in the roster anymore. They are listed in
`directory::HISTORICAL_OVERRIDES`, and more can be added through the
configuration of `fostats`.

### The result pages

One page per ballot. The title header gives the name of the ballot and the
`open from` statement gives the year:

```text
<title>Results of Questionnaire: Call for Review: Foo Charter - WBS</title>
...
This questionnaire was open from 2021-09-16 to 2021-10-14.
```

A page without one of them is reported as failed and is not tallied. Each vote
is a row of the results table:

```text
<tr><th scope='row'>Jane Doe (Individual)</th>
<td>[Formal Objection] to this Charter</td></tr>
```

## Positions

The positions are matched in the following order. The first match decides.

| Text contains                         | Position                       |
|---------------------------------------|--------------------------------|
| `[Formal Objection]`                  | formal objection               |
| `abstains` or `other`                 | abstention                     |
| `does not support`                    | does not support               |
| one of the known support phrasings    | support                        |
| anything else                         | unknown (logged as a warning)  |

The subject of a formal objection is `Charter` if the text mentions `Charter`,
`Recommendation` if it mentions `Recommendation`, and other otherwise. New
support phrasings can be added with `Classifier::with_support_phrases`.

Rows that are not votes are ignored: rows of other tables (`products`),
positions of less than 10 characters and the `Obsolete Recommendations`
boilerplate. A voter that appears several times on the same page is only
counted once.

## Configuration

`fostats` accepts a configuration file in JSON. All the fields are optional.

```text
{
  "cacheDirectory": "tmp/w3c-fo-stats",
  "indexFile": "votes.html",
  "rosterFile": "ac-reps.html",
  "resultsDirectory": "results",
  "minSupporters": 40,
  "voterOverrides": { "Jane Doe": "Acme Corp" },
  "supportPhrases": [ "supports the publication" ]
}
```

The command line flags take precedence over the configuration file.

 */
